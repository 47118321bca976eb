// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration resolution
//!
//! Every field of [`ClientOptions`] resolves from, in order, the explicit
//! option, its environment variable, and a literal default. Empty values
//! count as unset at every level.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::path::PathBuf;

use crate::discovery::WorkspaceId;
use crate::endpoints::derive_instance;
use crate::error::ConfigurationError;

pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
pub const ENV_INSTANCE: &str = "JIRA_INSTANCE";
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_WORKSPACE_ID: &str = "JIRA_WORKSPACE_ID";
pub const ENV_SPEC_FILE: &str = "ASSETS_SPEC_FILE";
pub const ENV_OUTPUT_DIR: &str = "ASSETS_OUTPUT_DIR";
pub const ENV_REGENERATE: &str = "ASSETS_REGENERATE";

/// Used when neither the options nor `JIRA_BASE_URL` name a site
pub const DEFAULT_BASE_URL: &str = "https://api.atlassian.com/jsm/assets";

/// The checked-in OpenAPI document this crate was built from
pub const DEFAULT_SPEC_FILE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../../openapi-specs/external/assets-api.json"
);

/// Where runtime regeneration writes `client.rs` unless told otherwise
///
/// Never the build's own `OUT_DIR`: the compiled client is read from there.
pub fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join(concat!("assets-client-", env!("CARGO_PKG_VERSION")))
}

/// Caller-supplied options; anything left unset is resolved from the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub instance: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<SecretString>,
    pub workspace_id: Option<String>,
    pub spec_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub regenerate: Option<bool>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(api_token.into()));
        self
    }

    pub fn with_workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn with_spec_file(mut self, spec_file: impl Into<PathBuf>) -> Self {
        self.spec_file = Some(spec_file.into());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_regenerate(mut self, regenerate: bool) -> Self {
        self.regenerate = Some(regenerate);
        self
    }
}

/// Fully resolved configuration for one initialization call
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub instance: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub api_token: SecretString,
    pub workspace_id: Option<WorkspaceId>,
    pub spec_file: PathBuf,
    pub output_dir: PathBuf,
    pub regenerate: bool,
}

/// Resolve against the process environment.
pub fn resolve(options: &ClientOptions) -> Result<ResolvedConfig, ConfigurationError> {
    resolve_with(options, |name| std::env::var(name).ok())
}

/// Resolve against an arbitrary environment lookup.
pub fn resolve_with<F>(options: &ClientOptions, env: F) -> Result<ResolvedConfig, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |explicit: &Option<String>, var: &str| -> Option<String> {
        non_empty(explicit.clone()).or_else(|| non_empty(env(var)))
    };

    let base_url = pick(&options.base_url, ENV_BASE_URL)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let instance =
        pick(&options.instance, ENV_INSTANCE).or_else(|| derive_instance(&base_url));

    let api_token = options
        .api_token
        .clone()
        .filter(|token| !token.expose_secret().trim().is_empty())
        .or_else(|| non_empty(env(ENV_API_TOKEN)).map(SecretString::from))
        .ok_or(ConfigurationError::MissingApiToken)?;

    let email = pick(&options.email, ENV_EMAIL).unwrap_or_default();
    if email.is_empty() {
        return Err(ConfigurationError::MissingEmail);
    }

    let workspace_id = pick(&options.workspace_id, ENV_WORKSPACE_ID).map(WorkspaceId::new);

    let spec_file = options
        .spec_file
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| non_empty(env(ENV_SPEC_FILE)).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SPEC_FILE));

    let output_dir = options
        .output_dir
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| non_empty(env(ENV_OUTPUT_DIR)).map(PathBuf::from))
        .unwrap_or_else(default_output_dir);

    let regenerate = options
        .regenerate
        .or_else(|| non_empty(env(ENV_REGENERATE)).map(|v| parse_flag(&v)))
        .unwrap_or(false);

    Ok(ResolvedConfig {
        base_url,
        instance,
        email,
        api_token,
        workspace_id,
        spec_file,
        output_dir,
        regenerate,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
