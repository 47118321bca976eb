// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Progenitor invocation

use anyhow::{Context, Result};
use progenitor::{GenerationSettings, InterfaceStyle, TagStyle};
use std::path::{Path, PathBuf};

use crate::patch::{self, PatchReport};

/// File name of the generated client inside an output directory
pub const GENERATED_FILE: &str = "client.rs";

/// Settings shared by `assets-client/build.rs` and runtime regeneration.
pub fn generation_settings() -> GenerationSettings {
    let mut settings = GenerationSettings::default();
    settings
        .with_interface(InterfaceStyle::Builder)
        .with_tag(TagStyle::Merged);
    settings
}

/// Read an OpenAPI document from disk and apply the known repairs.
pub fn load_patched(spec_file: &Path) -> Result<(openapiv3::OpenAPI, PatchReport)> {
    let spec = std::fs::read_to_string(spec_file)
        .with_context(|| format!("Failed to read {}", spec_file.display()))?;
    let mut openapi: openapiv3::OpenAPI = serde_json::from_str(&spec)
        .with_context(|| format!("Failed to parse {} as OpenAPI", spec_file.display()))?;
    let report = patch::apply(&mut openapi);
    Ok((openapi, report))
}

/// Generate client source for an (already patched) document.
///
/// The output is run through rustfmt when it is installed; otherwise the
/// raw token stream is returned, which compiles the same.
pub fn generate_source(openapi: &openapiv3::OpenAPI) -> Result<String> {
    let settings = generation_settings();
    let tokens = progenitor::Generator::new(&settings)
        .generate_tokens(openapi)
        .map_err(|e| anyhow::anyhow!("progenitor failed: {}", e))?;

    match rustfmt_wrapper::rustfmt(&tokens) {
        Ok(formatted) => Ok(formatted),
        Err(e) => {
            tracing::warn!("rustfmt unavailable ({}), writing unformatted source", e);
            Ok(tokens.to_string())
        }
    }
}

/// Regenerate `output_dir/client.rs` from `spec_file`.
pub fn generate_client(spec_file: &Path, output_dir: &Path) -> Result<PathBuf> {
    let (openapi, report) = load_patched(spec_file)?;
    for line in &report.applied {
        tracing::info!("patched {}: {}", spec_file.display(), line);
    }

    let source = generate_source(&openapi)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let out = output_dir.join(GENERATED_FILE);
    let header = format!(
        "// Generated by client-generator from {} ({} {}). Do not edit.\n\n",
        spec_file.display(),
        openapi.info.title,
        openapi.info.version
    );
    std::fs::write(&out, header + &source)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    tracing::info!("Generated client from OpenAPI spec: {}", spec_file.display());
    Ok(out)
}
