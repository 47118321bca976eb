// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! assets: command-line access to Jira Service Management Assets
//!
//! Credentials and site come from the flags below or, when a flag is not
//! given, from `JIRA_EMAIL`, `JIRA_API_TOKEN`, `JIRA_BASE_URL`,
//! `JIRA_INSTANCE` and `JIRA_WORKSPACE_ID`.

mod json;

use anyhow::{Context, Result};
use assets_client::types;
use assets_client::{ClientOptions, Endpoints, WorkspaceDiscoverer, init_client, resolve};
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;

use crate::json::{print_json, read_json};

#[derive(Parser)]
#[command(name = "assets", version)]
#[command(about = "CLI for Jira Service Management Assets", long_about = None)]
struct Cli {
    /// Site or legacy API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Atlassian instance name (the `acme` in acme.atlassian.net)
    #[arg(long, global = true)]
    instance: Option<String>,

    /// Account email
    #[arg(long, global = true)]
    email: Option<String>,

    /// API token
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Assets workspace id; discovered from the instance when omitted
    #[arg(long, global = true)]
    workspace_id: Option<String>,

    /// OpenAPI document used when the client is regenerated
    #[arg(long, global = true)]
    spec_file: Option<PathBuf>,

    /// Directory holding the generated client source
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Regenerate the client source before connecting
    #[arg(long, global = true)]
    regenerate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration (the API token is never printed)
    Config,
    /// Discover the Assets workspace id of the instance
    Workspace,
    /// List object schemas
    Schemas,
    /// List the object types of a schema
    ObjectTypes {
        /// Object schema id
        schema: String,
    },
    /// Get an object
    Get {
        /// Object id
        id: String,
    },
    /// Search objects with an AQL query
    Search {
        /// AQL query, e.g. `objectType = Host`
        aql: String,
        #[arg(long)]
        start_at: Option<i64>,
        #[arg(long)]
        max_results: Option<i64>,
    },
    /// Show the change history of an object
    History {
        /// Object id
        id: String,
    },
    /// Create an object from a JSON request body
    Create {
        /// File holding the body, or `-` for stdin
        file: PathBuf,
    },
    /// Update an object from a JSON request body
    Update {
        /// Object id
        id: String,
        /// File holding the body, or `-` for stdin
        file: PathBuf,
    },
    /// Delete an object
    Delete {
        /// Object id
        id: String,
    },
}

impl Cli {
    fn options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            instance: self.instance.clone(),
            email: self.email.clone(),
            api_token: self.api_token.clone().map(SecretString::from),
            workspace_id: self.workspace_id.clone(),
            spec_file: self.spec_file.clone(),
            output_dir: self.output_dir.clone(),
            // Unset lets ASSETS_REGENERATE decide
            regenerate: self.regenerate.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "assets=warn,assets_client=info".to_string()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();

    match cli.command {
        Commands::Config => {
            print_json(&resolve(&options)?)?;
        }
        Commands::Workspace => {
            let config = resolve(&options)?;
            let instance = config.instance.as_deref().context(
                "No instance known: pass --instance or a *.atlassian.net --base-url",
            )?;
            let id = WorkspaceDiscoverer::new(Endpoints::atlassian())?
                .discover(instance, &config.email, &config.api_token)
                .await?;
            print_json(&serde_json::json!({ "instance": instance, "workspaceId": id }))?;
        }
        command => run(command, options).await?,
    }

    Ok(())
}

/// Request bodies, read before any client is set up
enum Body {
    None,
    Create(types::ObjectCreateRequest),
    Update(types::ObjectUpdateRequest),
}

/// Commands that need a configured client
async fn run(command: Commands, options: ClientOptions) -> Result<()> {
    let body = match &command {
        Commands::Create { file } => Body::Create(read_json(file)?),
        Commands::Update { file, .. } => Body::Update(read_json(file)?),
        _ => Body::None,
    };

    let client = init_client(options).await?;

    match (command, body) {
        (Commands::Schemas, _) => {
            let schemas = client
                .call(|c| async move { c.list_object_schemas().send().await })
                .await?;
            print_json(&schemas.into_inner())?;
        }
        (Commands::ObjectTypes { schema }, _) => {
            let schema = schema.as_str();
            let object_types = client
                .call(|c| async move { c.list_object_types().id(schema).send().await })
                .await?;
            print_json(&object_types.into_inner())?;
        }
        (Commands::Get { id }, _) => {
            let id = id.as_str();
            let object = client
                .call(|c| async move { c.get_object().id(id).send().await })
                .await?;
            print_json(&object.into_inner())?;
        }
        (
            Commands::Search {
                aql,
                start_at,
                max_results,
            },
            _,
        ) => {
            let body: types::AqlSearchRequest =
                serde_json::from_value(serde_json::json!({ "qlQuery": aql }))?;
            let body = &body;
            let objects = client
                .call(|c| async move {
                    let mut request = c.search_objects().body(body.clone());
                    if let Some(start_at) = start_at {
                        request = request.start_at(start_at);
                    }
                    if let Some(max_results) = max_results {
                        request = request.max_results(max_results);
                    }
                    request.send().await
                })
                .await?;
            print_json(&objects.into_inner())?;
        }
        (Commands::History { id }, _) => {
            let id = id.as_str();
            let history = client
                .call(|c| async move { c.get_object_history().id(id).send().await })
                .await?;
            print_json(&history.into_inner())?;
        }
        (Commands::Create { .. }, Body::Create(body)) => {
            let body = &body;
            let object = client
                .call(|c| async move { c.create_object().body(body.clone()).send().await })
                .await?;
            print_json(&object.into_inner())?;
        }
        (Commands::Update { id, .. }, Body::Update(body)) => {
            let (id, body) = (id.as_str(), &body);
            let object = client
                .call(|c| async move { c.update_object().id(id).body(body.clone()).send().await })
                .await?;
            print_json(&object.into_inner())?;
        }
        (Commands::Delete { id }, _) => {
            let id = id.as_str();
            client
                .call(|c| async move { c.delete_object().id(id).send().await })
                .await?;
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        // Handled in main; Create and Update always carry their body
        _ => {}
    }

    Ok(())
}
