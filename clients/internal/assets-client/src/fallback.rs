// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Alternate-host fallback
//!
//! The workspace-scoped API answers on both the shared gateway and the
//! tenant site, and which of the two works for a given account is not known
//! up front. [`send_with_fallback`] wraps one request: if it fails, the
//! installed interceptors may name an alternate target, which is tried
//! exactly once. Whatever the second attempt returns is what the caller
//! sees.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// Picks an alternate target for a failed request
pub trait Interceptor: fmt::Debug + Send + Sync {
    /// `None` means this interceptor has no opinion about `failed`.
    fn retarget(&self, failed: &Url) -> Option<Url>;
}

/// Swaps between the shared API origin and an instance's site origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFallback {
    generic: Url,
    instance: Url,
}

impl HostFallback {
    pub fn new(generic: Url, instance: Url) -> Self {
        Self { generic, instance }
    }
}

impl Interceptor for HostFallback {
    fn retarget(&self, failed: &Url) -> Option<Url> {
        let origin = failed.origin();
        if origin == self.generic.origin() {
            with_origin(failed, &self.instance)
        } else if origin == self.instance.origin() {
            with_origin(failed, &self.generic)
        } else {
            None
        }
    }
}

/// `url` with the scheme, host and port of `to`; path and query unchanged.
fn with_origin(url: &Url, to: &Url) -> Option<Url> {
    let mut out = url.clone();
    out.set_scheme(to.scheme()).ok()?;
    out.set_host(to.host_str()).ok()?;
    out.set_port(to.port()).ok()?;
    Some(out)
}

/// Send to `target`; on failure, send once more to the first alternate an
/// interceptor offers.
pub async fn send_with_fallback<F, Fut, T, E>(
    interceptors: &[Arc<dyn Interceptor>],
    target: Url,
    mut send: F,
) -> Result<T, E>
where
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let first = send(target.clone()).await;
    if first.is_ok() {
        return first;
    }

    match alternate_target(interceptors, &target) {
        Some(alternate) => send(alternate).await,
        None => first,
    }
}

/// The first alternate any interceptor offers for a failed `target`.
pub(crate) fn alternate_target(interceptors: &[Arc<dyn Interceptor>], target: &Url) -> Option<Url> {
    let alternate = interceptors.iter().find_map(|i| i.retarget(target))?;
    tracing::warn!(
        "Request to {} failed, retrying once against {}",
        target,
        alternate
    );
    Some(alternate)
}

/// Render a base URL the way progenitor expects it: no trailing slash.
pub(crate) fn base_url_string(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
