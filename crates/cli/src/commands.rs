//! Command handlers, one per manager operation
//!
//! Each handler returns the line printed on success. Failures come back as
//! errors carrying the correlation id so they can be matched with the logs.

use anyhow::{anyhow, Context, Result};
use colladmin_client::CollectionManager;

/// Operation selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Exists,
    Show,
    Create {
        throughput: u32,
        index_names: Vec<String>,
    },
    ReadThroughput,
    UpdateThroughput {
        throughput: u32,
    },
    UpdateIndexes {
        index_names: Vec<String>,
    },
}

pub async fn run_command(
    manager: &dyn CollectionManager,
    command: &AdminCommand,
    correlation_id: &str,
) -> Result<String> {
    match command {
        AdminCommand::Exists => {
            let exists = manager
                .collection_exists(correlation_id)
                .await
                .with_context(|| format!("[{correlation_id}] existence check failed"))?;
            Ok(if exists { "exists" } else { "missing" }.to_string())
        }
        AdminCommand::Show => {
            let collection = manager
                .get_collection(correlation_id)
                .await
                .with_context(|| format!("[{correlation_id}] fetching collection failed"))?;
            serde_json::to_string_pretty(&collection).context("Failed to render collection")
        }
        AdminCommand::Create {
            throughput,
            index_names,
        } => {
            manager
                .create_collection(correlation_id, *throughput, index_names)
                .await
                .with_context(|| format!("[{correlation_id}] collection creation failed"))?;
            Ok(format!("created with throughput {throughput}"))
        }
        AdminCommand::ReadThroughput => {
            let throughput = manager
                .read_throughput(correlation_id)
                .await
                .with_context(|| format!("[{correlation_id}] reading throughput failed"))?;
            Ok(throughput.to_string())
        }
        AdminCommand::UpdateThroughput { throughput } => {
            if manager.apply_throughput(correlation_id, *throughput).await {
                Ok(format!("throughput set to {throughput}"))
            } else {
                Err(anyhow!(
                    "[{correlation_id}] throughput update to {throughput} was not applied"
                ))
            }
        }
        AdminCommand::UpdateIndexes { index_names } => {
            manager
                .update_indexes(correlation_id, index_names)
                .await
                .with_context(|| format!("[{correlation_id}] index update failed"))?;
            Ok(format!("indexes updated ({} fields)", index_names.len()))
        }
    }
}
