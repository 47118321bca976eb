// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for assets-client

use std::path::PathBuf;
use thiserror::Error;

/// Mandatory configuration missing after resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No API token in the options or `JIRA_API_TOKEN`
    #[error("Configuration error: API token is required (set JIRA_API_TOKEN or pass api_token)")]
    MissingApiToken,

    /// No account email in the options or `JIRA_EMAIL`
    #[error("Configuration error: account email is required (set JIRA_EMAIL or pass email)")]
    MissingEmail,
}

/// Workspace discovery failed
///
/// Never fatal during initialization; the orchestrator logs it and carries
/// on without a workspace id.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The request could not be sent or the body could not be read
    #[error("Workspace discovery request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The discovery endpoint answered with a non-success status
    #[error("Workspace discovery returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not the expected JSON
    #[error("Workspace discovery returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body had no `values` list
    #[error("Workspace discovery response has no values list")]
    MissingValues,

    /// The `values` list was empty
    #[error("No Assets workspace found for this site")]
    NoWorkspaces,

    /// The credentials cannot be carried in an Authorization header
    #[error("Workspace discovery credentials are not a valid header value")]
    InvalidCredentials,

    /// The discovery URL could not be built from the instance name
    #[error("Invalid discovery URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The generated client could not be loaded or regenerated
#[derive(Error, Debug)]
pub enum ImportError {
    /// Regeneration was needed but there is no document to generate from
    #[error("Cannot generate client: OpenAPI spec {} does not exist", .0.display())]
    SpecMissing(PathBuf),

    /// Regeneration would overwrite the client this crate was compiled from
    #[error("Refusing to regenerate into the build output directory {}", .0.display())]
    BuildOutputDir(PathBuf),

    /// The generator collaborator failed
    #[error("Failed to generate client from {}: {message}", .spec.display())]
    Generation { spec: PathBuf, message: String },
}

/// The generated client rejected the configuration
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    /// A base URL or vendor origin does not parse
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A value cannot be carried in an HTTP header
    #[error("Invalid {name} header: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The HTTP transport could not be built
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Fatal initialization failures
#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Configurator(#[from] ConfiguratorError),
}
