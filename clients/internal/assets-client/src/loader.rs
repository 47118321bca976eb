// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Loading the generated client

use std::path::Path;

use crate::config::ResolvedConfig;
use crate::configure::GeneratedClient;
use crate::error::ImportError;

/// Produces an unconfigured generated client
pub trait ClientLoader: Send + Sync {
    fn load(&self, config: &ResolvedConfig) -> Result<GeneratedClient, ImportError>;
}

/// Loads the generated client from `output_dir`, regenerating it from
/// `spec_file` when asked to or when nothing is cached there yet.
///
/// The operations compiled into this crate are the ones generated at build
/// time; regeneration refreshes the source on disk. It refuses to write
/// into the build's own output directory, which the compiled client is
/// included from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLoader;

impl ClientLoader for ArtifactLoader {
    fn load(&self, config: &ResolvedConfig) -> Result<GeneratedClient, ImportError> {
        let cached = config.output_dir.join(client_generator::GENERATED_FILE);
        if !config.regenerate && cached.is_file() {
            tracing::debug!("Using generated client {}", cached.display());
            return Ok(GeneratedClient::new(cached));
        }

        if is_build_output(&config.output_dir) {
            return Err(ImportError::BuildOutputDir(config.output_dir.clone()));
        }
        if !config.spec_file.is_file() {
            return Err(ImportError::SpecMissing(config.spec_file.clone()));
        }

        tracing::info!(
            "Generating client from {} into {}",
            config.spec_file.display(),
            config.output_dir.display()
        );
        let source = client_generator::generate_client(&config.spec_file, &config.output_dir)
            .map_err(|e| ImportError::Generation {
                spec: config.spec_file.clone(),
                message: format!("{:#}", e),
            })?;
        Ok(GeneratedClient::new(source))
    }
}

fn is_build_output(dir: &Path) -> bool {
    let build = Path::new(env!("OUT_DIR"));
    match (dir.canonicalize(), build.canonicalize()) {
        (Ok(dir), Ok(build)) => dir == build,
        _ => dir == build,
    }
}
