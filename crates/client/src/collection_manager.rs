//! Collection management for the document service
//!
//! This module provides the trait for collection lifecycle operations,
//! separate from document CRUD.

use async_trait::async_trait;
use colladmin_core::entities::CollectionEntity;
use colladmin_core::error::Result;
use tracing::warn;

/// Trait for collection lifecycle management operations
///
/// Every operation takes a caller-supplied correlation id that is attached
/// to all log events it emits. Nothing is retried and nothing is cached.
#[async_trait]
pub trait CollectionManager: Send + Sync {
    /// Check if the collection exists
    ///
    /// 2xx means true, 404 means false; any other status is an
    /// [`Error::Connection`](colladmin_core::Error::Connection).
    async fn collection_exists(&self, correlation_id: &str) -> Result<bool>;

    /// Fetch the collection's current definition
    async fn get_collection(&self, correlation_id: &str) -> Result<CollectionEntity>;

    /// Create the partitioned collection with the given throughput and hash-indexed fields
    async fn create_collection(
        &self,
        correlation_id: &str,
        throughput: u32,
        index_names: &[String],
    ) -> Result<()>;

    /// Current provisioned throughput of the collection
    async fn read_throughput(&self, correlation_id: &str) -> Result<u32>;

    /// Replace the collection's provisioned throughput
    ///
    /// Looks up the collection's resource id, finds the offer that references
    /// it and writes the offer back with the new value. The three steps are
    /// not atomic; a concurrent change between lookup and write is overwritten.
    async fn update_throughput(&self, correlation_id: &str, throughput: u32) -> Result<()>;

    /// Rebuild the included index paths, keeping id, partition key and excluded paths
    async fn update_indexes(&self, correlation_id: &str, index_names: &[String]) -> Result<()>;

    /// [`update_throughput`](Self::update_throughput) reporting failure as `false`
    async fn apply_throughput(&self, correlation_id: &str, throughput: u32) -> bool {
        match self.update_throughput(correlation_id, throughput).await {
            Ok(()) => true,
            Err(e) => {
                warn!(correlation_id, throughput, "Throughput update not applied: {e}");
                false
            }
        }
    }
}
