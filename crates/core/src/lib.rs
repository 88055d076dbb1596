//! Core types for administering partitioned document collections
//!
//! This crate provides the foundational pieces shared by the REST client
//! and the command-line front end:
//!
//! - **Entities**: wire shapes for collections, indexing policies, partition
//!   keys and offers
//! - **Configuration**: config loading and the immutable connection context
//! - **Error handling**: unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod entities;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, ConnectionContext, ConnectionDescriptor};
pub use entities::{
    CollectionEntity, CollectionProjection, IncludedPathEntity, IndexingPolicyEntity,
    OfferEntity, OfferQuery, PartitionKeyEntity, SearchOffersEntity,
};
pub use error::{Error, Result};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
