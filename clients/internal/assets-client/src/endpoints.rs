// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Vendor addressing
//!
//! Assets is reachable through two host namespaces:
//!
//! - the tenant site, `https://{instance}.atlassian.net`, which serves the
//!   workspace discovery endpoint and the legacy `/rest/assets/1.0` API
//! - the shared API gateway, `https://api.atlassian.com`, which serves the
//!   workspace-scoped API under `/jsm/assets/workspace/{workspaceId}/v1`
//!
//! Both are overridable so tests can point them at local mock servers.

use url::Url;

use crate::discovery::WorkspaceId;

/// Suffix of every tenant site host
pub const SITE_DOMAIN: &str = "atlassian.net";

/// Path of the workspace discovery endpoint on the tenant site
pub const DISCOVERY_PATH: &str = "/rest/servicedeskapi/assets/workspace";

const DEFAULT_SITE_TEMPLATE: &str = "https://{instance}.atlassian.net";
const DEFAULT_API_BASE: &str = "https://api.atlassian.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Tenant site URL; `{instance}` is replaced by the instance name
    pub site_template: String,
    /// Shared API gateway URL
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::atlassian()
    }
}

impl Endpoints {
    /// Atlassian's production hosts
    pub fn atlassian() -> Self {
        Self::new(DEFAULT_SITE_TEMPLATE, DEFAULT_API_BASE)
    }

    pub fn new(site_template: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            site_template: site_template.into(),
            api_base: api_base.into(),
        }
    }

    /// Tenant site URL for an instance, without a trailing slash
    pub fn site_url(&self, instance: &str) -> String {
        self.site_template
            .replace("{instance}", instance)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn discovery_url(&self, instance: &str) -> String {
        format!("{}{}", self.site_url(instance), DISCOVERY_PATH)
    }

    /// Base URL of the workspace-scoped API
    pub fn workspace_base_url(&self, workspace_id: &WorkspaceId) -> String {
        format!(
            "{}/jsm/assets/workspace/{}/v1",
            self.api_base.trim_end_matches('/'),
            workspace_id
        )
    }

    /// Origin of the shared API gateway
    pub fn api_origin(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_base)
    }

    /// Origin of an instance's tenant site
    pub fn site_origin(&self, instance: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.site_url(instance))
    }
}

/// Extract the instance name from a tenant site URL.
///
/// The instance is the host label immediately preceding `.atlassian.net`:
/// `https://acme.atlassian.net/rest/assets/1.0` yields `acme`.
pub fn derive_instance(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let prefix = host.strip_suffix(SITE_DOMAIN)?.strip_suffix('.')?;
    let instance = prefix.rsplit('.').next()?;
    if instance.is_empty() {
        None
    } else {
        Some(instance.to_string())
    }
}
