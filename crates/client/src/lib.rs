//! REST client for collection lifecycle administration
//!
//! This crate signs and sends the service's REST calls and implements the
//! collection operations on top of them: existence check, creation,
//! throughput read/update and index update.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod auth;
mod collection_manager;
pub mod error;
mod factory;
pub mod mock;
mod rest;
pub mod transport;

pub use auth::{canonical_payload, generate_auth_token, MasterKeySigner};
pub use collection_manager::CollectionManager;
pub use error::TransportError;
pub use factory::{create_collection_manager, create_collection_manager_with_client};
pub use transport::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient, ResourceRequest,
    ResourceType, RestTransport,
};
