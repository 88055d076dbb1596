//! colladmin CLI - collection lifecycle administration
//!
//! This binary provides the command-line interface to the collection manager.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colladmin::commands::{run_command, AdminCommand};
use colladmin_client::create_collection_manager;
use colladmin_core::config::Config;
use std::path::PathBuf;
use tracing::{debug, error};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "colladmin")]
#[command(about = "Administer a partitioned document collection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Correlation id attached to every log event (generated when omitted)
    #[arg(long, global = true)]
    correlation_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the collection exists
    Exists,
    /// Print the collection definition as JSON
    Show,
    /// Create the collection
    Create {
        /// Provisioned throughput in request units
        #[arg(long)]
        throughput: u32,
        /// Field to hash-index (repeatable)
        #[arg(long = "index", value_name = "FIELD")]
        index_names: Vec<String>,
    },
    /// Print the provisioned throughput
    ReadThroughput,
    /// Change the provisioned throughput
    UpdateThroughput {
        /// New throughput in request units
        throughput: u32,
    },
    /// Replace the hash-indexed fields
    UpdateIndexes {
        /// Field to hash-index (repeatable)
        #[arg(long = "index", value_name = "FIELD")]
        index_names: Vec<String>,
    },
}

impl From<Commands> for AdminCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Exists => AdminCommand::Exists,
            Commands::Show => AdminCommand::Show,
            Commands::Create {
                throughput,
                index_names,
            } => AdminCommand::Create {
                throughput,
                index_names,
            },
            Commands::ReadThroughput => AdminCommand::ReadThroughput,
            Commands::UpdateThroughput { throughput } => {
                AdminCommand::UpdateThroughput { throughput }
            }
            Commands::UpdateIndexes { index_names } => AdminCommand::UpdateIndexes { index_names },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let correlation_id = cli
        .correlation_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!(correlation_id = %correlation_id, "Starting command");

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let manager = create_collection_manager(&config).context("Failed to set up client")?;

    let command = AdminCommand::from(cli.command);
    match run_command(manager.as_ref(), &command, &correlation_id).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(correlation_id = %correlation_id, "{e:#}");
            Err(e)
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "colladmin={level},colladmin_client={level},colladmin_core={level}"
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
