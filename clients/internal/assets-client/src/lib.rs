// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Jira Service Management Assets client
//!
//! A Progenitor-generated client for the Assets REST API together with the
//! bootstrap that makes it usable: credentials and site come from options
//! or the environment, the workspace id is discovered from the tenant site
//! when not given, and the generated client is pointed at the right base
//! URL with the right headers.
//!
//! # Example
//!
//! ```ignore
//! use assets_client::{ClientOptions, init_client};
//!
//! let client = init_client(ClientOptions::new().with_instance("acme")).await?;
//! let schemas = client
//!     .call(|c| async move { c.list_object_schemas().send().await })
//!     .await?
//!     .into_inner();
//! ```
//!
//! Only `call` and `execute` apply the alternate-host fallback; the
//! generated client from `without_fallback` sends every request once, to the
//! configured base URL.
//!
//! # Environment
//!
//! - `JIRA_BASE_URL`, `JIRA_INSTANCE`, `JIRA_WORKSPACE_ID`
//! - `JIRA_EMAIL`, `JIRA_API_TOKEN` (required)
//! - `ASSETS_SPEC_FILE`, `ASSETS_OUTPUT_DIR`, `ASSETS_REGENERATE`

pub mod client;
pub mod config;
pub mod configure;
pub mod discovery;
pub mod endpoints;
pub mod error;
pub mod fallback;
pub mod init;
pub mod loader;

// Include the Progenitor-generated client code
include!(concat!(env!("OUT_DIR"), "/client.rs"));

pub use client::AssetsClient;
pub use config::{ClientOptions, ResolvedConfig, resolve, resolve_with};
pub use configure::{AddressingMode, ClientConfig, CredentialsMode, GeneratedClient, configure};
pub use discovery::{WorkspaceDiscoverer, WorkspaceId};
pub use endpoints::Endpoints;
pub use error::{ConfigurationError, ConfiguratorError, DiscoveryError, ImportError, InitError};
pub use fallback::{HostFallback, Interceptor};
pub use init::{Bootstrap, InitState, init_client};
pub use loader::{ArtifactLoader, ClientLoader};

pub(crate) const USER_AGENT: &str = concat!("assets-client/", env!("CARGO_PKG_VERSION"));

/// Install the ring crypto provider for rustls, once per process.
///
/// reqwest is built without a default provider; every transport client in
/// this crate calls this first.
pub fn install_crypto_provider() {
    // Err only means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}
