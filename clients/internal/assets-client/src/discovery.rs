// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Workspace discovery
//!
//! The workspace-scoped API needs an opaque workspace id that only the
//! tenant site can hand out:
//!
//! ```text
//! GET https://{instance}.atlassian.net/rest/servicedeskapi/assets/workspace
//! -> { "values": [ { "workspaceId": "..." }, ... ] }
//! ```

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::endpoints::Endpoints;
use crate::error::DiscoveryError;

/// An Assets workspace identifier, treated as opaque
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WorkspaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
struct WorkspaceListing {
    #[serde(default)]
    values: Option<Vec<WorkspaceEntry>>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceEntry {
    #[serde(rename = "workspaceId")]
    workspace_id: String,
}

/// `Basic base64(email:api_token)`
pub fn basic_credentials(email: &str, api_token: &SecretString) -> String {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    let credentials = format!("{}:{}", email, api_token.expose_secret());
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// Maps (instance, credentials) to a workspace id
#[derive(Debug, Clone)]
pub struct WorkspaceDiscoverer {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl WorkspaceDiscoverer {
    pub fn new(endpoints: Endpoints) -> Result<Self, DiscoveryError> {
        crate::install_crypto_provider();
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()?;
        Ok(Self::with_client(http, endpoints))
    }

    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Look up the first workspace of `instance`.
    ///
    /// Issues exactly one request; there is no retry at this layer.
    pub async fn discover(
        &self,
        instance: &str,
        email: &str,
        api_token: &SecretString,
    ) -> Result<WorkspaceId, DiscoveryError> {
        let url = self.endpoints.discovery_url(instance);
        let parsed = url::Url::parse(&url).map_err(|source| DiscoveryError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&basic_credentials(email, api_token))
            .map_err(|_| DiscoveryError::InvalidCredentials)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!("Discovering Assets workspace via {}", url);
        let response = self.http.get(parsed).headers(headers).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DiscoveryError::Status { status, body });
        }

        first_workspace(&body)
    }
}

fn first_workspace(body: &str) -> Result<WorkspaceId, DiscoveryError> {
    let listing: WorkspaceListing = serde_json::from_str(body)?;
    let values = listing.values.ok_or(DiscoveryError::MissingValues)?;
    values
        .into_iter()
        .next()
        .map(|entry| WorkspaceId(entry.workspace_id))
        .ok_or(DiscoveryError::NoWorkspaces)
}
