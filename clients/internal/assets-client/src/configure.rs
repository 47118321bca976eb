// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration
//!
//! [`configure`] fills in a [`GeneratedClient`]'s [`ClientConfig`] from a
//! resolved configuration; [`GeneratedClient::connect`] then turns it into
//! a usable [`AssetsClient`].

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

use crate::AssetsClient;
use crate::config::ResolvedConfig;
use crate::discovery::{WorkspaceId, basic_credentials};
use crate::endpoints::Endpoints;
use crate::error::ConfiguratorError;
use crate::fallback::{HostFallback, Interceptor};

/// Cross-origin credentials policy, as understood by browser transports.
///
/// reqwest has no notion of it; it is carried so the configuration reads
/// the same whichever transport consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CredentialsMode {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// The settable surface of a generated client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: HeaderMap,
    pub with_credentials: bool,
    pub credentials: CredentialsMode,
    pub interceptors: Vec<Arc<dyn Interceptor>>,
}

/// Which generation of the API a client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    /// `{api_base}/jsm/assets/workspace/{id}/v1`
    Workspace(WorkspaceId),
    /// The resolved base URL as given, typically `/rest/assets/1.0` on the
    /// tenant site
    Legacy,
}

impl AddressingMode {
    /// Workspace addressing whenever a workspace id is known.
    pub fn for_config(config: &ResolvedConfig) -> Self {
        match &config.workspace_id {
            Some(id) => AddressingMode::Workspace(id.clone()),
            None => AddressingMode::Legacy,
        }
    }

    pub fn base_url(&self, config: &ResolvedConfig, endpoints: &Endpoints) -> String {
        match self {
            AddressingMode::Workspace(id) => endpoints.workspace_base_url(id),
            AddressingMode::Legacy => config.base_url.clone(),
        }
    }
}

/// A loaded, not yet configured, generated client
#[derive(Debug, Clone, Default)]
pub struct GeneratedClient {
    config: ClientConfig,
    source: PathBuf,
}

impl GeneratedClient {
    /// `source` is the generated client file this handle was loaded from.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            config: ClientConfig::default(),
            source: source.into(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Build the HTTP transport and the generated client from the
    /// configuration.
    pub fn connect(self) -> Result<AssetsClient, ConfiguratorError> {
        AssetsClient::from_config(self.config)
    }
}

/// Apply `resolved` to `client`'s configuration in place.
pub fn configure(
    client: &mut GeneratedClient,
    resolved: &ResolvedConfig,
    endpoints: &Endpoints,
) -> Result<(), ConfiguratorError> {
    let mode = AddressingMode::for_config(resolved);
    let base_url = mode.base_url(resolved, endpoints);
    Url::parse(&base_url).map_err(|source| ConfiguratorError::InvalidBaseUrl {
        url: base_url.clone(),
        source,
    })?;

    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&basic_credentials(&resolved.email, &resolved.api_token))
        .map_err(|source| ConfiguratorError::InvalidHeader {
            name: "Authorization",
            source,
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut interceptors: Vec<Arc<dyn Interceptor>> = Vec::new();
    if let (Some(instance), AddressingMode::Workspace(_)) = (&resolved.instance, &mode) {
        let generic = endpoints
            .api_origin()
            .map_err(|source| ConfiguratorError::InvalidBaseUrl {
                url: endpoints.api_base.clone(),
                source,
            })?;
        let site = endpoints
            .site_origin(instance)
            .map_err(|source| ConfiguratorError::InvalidBaseUrl {
                url: endpoints.site_url(instance),
                source,
            })?;
        interceptors.push(Arc::new(HostFallback::new(generic, site)));
    }

    let config = client.config_mut();
    config.base_url = base_url;
    config.headers = headers;
    config.with_credentials = true;
    config.credentials = CredentialsMode::Include;
    config.interceptors = interceptors;

    tracing::debug!(
        "Configured client for {} ({} addressing, {} interceptor(s))",
        config.base_url,
        match mode {
            AddressingMode::Workspace(_) => "workspace",
            AddressingMode::Legacy => "legacy",
        },
        config.interceptors.len()
    );
    Ok(())
}
