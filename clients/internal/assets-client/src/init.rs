// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client initialization
//!
//! ```text
//! Resolving -> [Discovering] -> Importing -> Configuring -> Ready
//!      \              |              \             \
//!       +-> Failed    +-> (continue)  +-> Failed    +-> Failed
//! ```
//!
//! Discovery runs only when no workspace id was supplied but an instance is
//! known, and its failure only costs the workspace-scoped addressing.

use std::fmt;
use std::sync::Arc;

use crate::AssetsClient;
use crate::config::{ClientOptions, ResolvedConfig, resolve_with};
use crate::configure::configure;
use crate::discovery::{WorkspaceDiscoverer, WorkspaceId};
use crate::endpoints::Endpoints;
use crate::error::{DiscoveryError, InitError};
use crate::loader::{ArtifactLoader, ClientLoader};

/// Stages of one initialization call
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum InitState {
    Resolving,
    Discovering,
    Importing,
    Configuring,
    Ready,
    Failed,
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Everything initialization depends on besides the caller's options
///
/// The defaults talk to Atlassian, read the process environment and load
/// the generated client with [`ArtifactLoader`].
#[derive(Clone)]
pub struct Bootstrap {
    endpoints: Endpoints,
    env: EnvLookup,
    loader: Arc<dyn ClientLoader>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::atlassian(),
            env: Arc::new(|name| std::env::var(name).ok()),
            loader: Arc::new(ArtifactLoader),
        }
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the process environment as the fallback for unset options.
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(env);
        self
    }

    pub fn with_loader(mut self, loader: impl ClientLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Resolve, discover, load and configure a client.
    pub async fn init(&self, options: ClientOptions) -> Result<AssetsClient, InitError> {
        let result = self.run(options).await;
        if let Err(e) = &result {
            enter(InitState::Failed);
            tracing::debug!("Client initialization failed: {}", e);
        }
        result
    }

    async fn run(&self, options: ClientOptions) -> Result<AssetsClient, InitError> {
        enter(InitState::Resolving);
        let mut resolved = resolve_with(&options, |name| (self.env)(name))?;

        if resolved.workspace_id.is_none() {
            if let Some(instance) = resolved.instance.clone() {
                enter(InitState::Discovering);
                match self.discover(&instance, &resolved).await {
                    Ok(id) => {
                        tracing::debug!("Discovered workspace {} for {}", id, instance);
                        resolved.workspace_id = Some(id);
                    }
                    Err(e) => tracing::warn!(
                        "Workspace discovery for {} failed, continuing without a workspace id: {}",
                        instance,
                        e
                    ),
                }
            }
        }

        enter(InitState::Importing);
        let mut client = self.loader.load(&resolved)?;

        enter(InitState::Configuring);
        configure(&mut client, &resolved, &self.endpoints)?;
        let client = client.connect()?;

        enter(InitState::Ready);
        Ok(client)
    }

    async fn discover(
        &self,
        instance: &str,
        resolved: &ResolvedConfig,
    ) -> Result<WorkspaceId, DiscoveryError> {
        WorkspaceDiscoverer::new(self.endpoints.clone())?
            .discover(instance, &resolved.email, &resolved.api_token)
            .await
    }
}

fn enter(state: InitState) {
    tracing::debug!("Client initialization: {}", state);
}

/// Initialize a client against Atlassian with the process environment.
pub async fn init_client(options: ClientOptions) -> Result<AssetsClient, InitError> {
    Bootstrap::default().init(options).await
}
