// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The configured client handle

use std::future::Future;
use url::Url;

use crate::Client;
use crate::configure::ClientConfig;
use crate::error::ConfiguratorError;
use crate::fallback::{alternate_target, base_url_string, send_with_fallback};

/// A generated Assets client bound to a [`ClientConfig`]
///
/// Only [`AssetsClient::call`] and [`AssetsClient::execute`] apply the
/// configured interceptors. [`AssetsClient::without_fallback`] hands out the
/// generated client itself; requests made through it are sent once, to the
/// configured base URL, even when a host fallback is installed.
///
/// ```ignore
/// let object = client
///     .call(|c| async move { c.get_object().id("42").send().await })
///     .await?
///     .into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct AssetsClient {
    config: ClientConfig,
    http: reqwest::Client,
    client: Client,
    base: Url,
}

/// A failed attempt of a raw request
enum Failure {
    Status(reqwest::Response),
    Transport(reqwest::Error),
}

impl AssetsClient {
    pub(crate) fn from_config(config: ClientConfig) -> Result<Self, ConfiguratorError> {
        let base = Url::parse(&config.base_url).map_err(|source| {
            ConfiguratorError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;

        crate::install_crypto_provider();
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .default_headers(config.headers.clone())
            .build()?;
        let client = Client::new_with_client(&base_url_string(&base), http.clone());

        Ok(Self {
            config,
            http,
            client,
            base,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The generated client, bypassing every interceptor.
    pub fn without_fallback(&self) -> &Client {
        &self.client
    }

    /// Run a generated operation, retrying it once on an alternate origin
    /// if it fails and an interceptor offers one.
    ///
    /// `op` is handed a generated client rooted at the attempted base URL
    /// and may be invoked twice.
    pub async fn call<F, Fut, T, E>(&self, op: F) -> Result<T, E>
    where
        F: Fn(Client) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        send_with_fallback(&self.config.interceptors, self.base.clone(), |target| {
            let client = if target == self.base {
                self.client.clone()
            } else {
                Client::new_with_client(&base_url_string(&target), self.http.clone())
            };
            op(client)
        })
        .await
    }

    /// Send a raw request with the configured headers.
    ///
    /// A transport error or a non-success status counts as a failure; the
    /// request is then re-sent once to the alternate origin, if there is one
    /// and its body can be cloned. Non-success responses are returned as
    /// `Ok` once no retry is left.
    pub async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let target = request.url().clone();
        let spare = request.try_clone();

        let first = self.attempt(request).await;
        if first.is_ok() {
            return settle(first);
        }

        let (Some(mut retry), Some(alternate)) =
            (spare, alternate_target(&self.config.interceptors, &target))
        else {
            return settle(first);
        };
        *retry.url_mut() = alternate;
        settle(self.attempt(retry).await)
    }

    async fn attempt(&self, request: reqwest::Request) -> Result<reqwest::Response, Failure> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(Failure::Transport)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Failure::Status(response))
        }
    }
}

fn settle(outcome: Result<reqwest::Response, Failure>) -> Result<reqwest::Response, reqwest::Error> {
    match outcome {
        Ok(response) | Err(Failure::Status(response)) => Ok(response),
        Err(Failure::Transport(err)) => Err(err),
    }
}
