// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Download the Assets OpenAPI document

use anyhow::{Context, Result, bail};
use std::path::Path;

/// Where Atlassian publishes the Assets REST API description
pub const DEFAULT_SPEC_URL: &str = "https://dac-static.atlassian.com/cloud/assets/swagger.v3.json";

/// Fetch the OpenAPI document at `url` and write it to `dest`.
///
/// The body must parse as an OpenAPI 3.0 document; it is re-serialized
/// pretty-printed so diffs against the checked-in copy stay readable.
pub async fn fetch_spec(url: &str, dest: &Path) -> Result<()> {
    // Err means a provider is already installed for this process.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = reqwest::Client::builder()
        .user_agent(concat!("client-generator/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    tracing::info!("Fetching OpenAPI document from {}", url);
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Fetching {} returned HTTP {}", url, status);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    let document = normalize_document(&body)?;

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(dest, document).with_context(|| format!("Failed to write {}", dest.display()))?;

    tracing::info!("Wrote OpenAPI document to {}", dest.display());
    Ok(())
}

/// Check that `body` is an OpenAPI document and pretty-print it.
fn normalize_document(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).context("Response is not valid JSON")?;
    serde_json::from_value::<openapiv3::OpenAPI>(value.clone())
        .context("Response is not an OpenAPI 3.0 document")?;

    let mut pretty = serde_json::to_string_pretty(&value)?;
    pretty.push('\n');
    Ok(pretty)
}
