// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! client-generator: fetch, patch and generate the Assets API client
//!
//! ```bash
//! cargo run -p client-generator -- fetch
//! cargo run -p client-generator -- patch --check
//! cargo run -p client-generator -- generate --out-dir target/assets-client
//! ```

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "client-generator")]
#[command(about = "Fetch, patch and generate the Assets API client", long_about = None)]
struct Cli {
    /// OpenAPI document to read or write
    #[arg(long, global = true, env = "ASSETS_SPEC_FILE", default_value_t = default_spec_file())]
    spec: Utf8PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the published OpenAPI document
    Fetch {
        /// Source URL
        #[arg(long, env = "ASSETS_SPEC_URL", default_value = client_generator::DEFAULT_SPEC_URL)]
        url: String,
    },
    /// Apply the known repairs to the document in place
    Patch {
        /// Report what would change and fail if anything would, without writing
        #[arg(long)]
        check: bool,
    },
    /// Generate the client source
    Generate {
        /// Directory to write client.rs into
        #[arg(long, env = "ASSETS_OUTPUT_DIR")]
        out_dir: Utf8PathBuf,
    },
}

fn default_spec_file() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|root| root.join("openapi-specs/external/assets-api.json"))
        .unwrap_or_else(|| Utf8PathBuf::from("openapi-specs/external/assets-api.json"))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "client_generator=info".to_string()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { url } => {
            client_generator::fetch_spec(&url, cli.spec.as_std_path()).await?;
            println!("Fetched {} -> {}", url, cli.spec);
        }
        Commands::Patch { check } => {
            let (openapi, report) = client_generator::generate::load_patched(cli.spec.as_std_path())?;
            if report.is_empty() {
                println!("{} needs no repairs", cli.spec);
                return Ok(ExitCode::SUCCESS);
            }
            print!("{}", report);
            if check {
                return Ok(ExitCode::FAILURE);
            }
            let mut patched = serde_json::to_string_pretty(&openapi)?;
            patched.push('\n');
            std::fs::write(&cli.spec, patched)
                .with_context(|| format!("Failed to write {}", cli.spec))?;
            println!("Patched {}", cli.spec);
        }
        Commands::Generate { out_dir } => {
            let out = client_generator::generate_client(cli.spec.as_std_path(), out_dir.as_std_path())?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
