//! Configuration module for colladmin
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod connection;
mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use connection::{ConnectionContext, ConnectionDescriptor};

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.colladmin/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".colladmin").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Driver connection descriptor
    pub connection: ConnectionConfig,

    /// Target collection
    pub collection: CollectionConfig,

    /// REST service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Connection descriptor settings
///
/// The URI follows the document driver's format, e.g.
/// `mongodb://account:<key>@account.documents.azure.com:10255/?ssl=true&authSource=shop`.
/// The credential source names the database and the password is the master key.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub uri: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = ConnectionDescriptor::parse(&self.uri)
            .map(|d| d.redacted_uri())
            .unwrap_or_else(|_| "***REDACTED***".to_string());
        f.debug_struct("ConnectionConfig")
            .field("uri", &redacted)
            .finish()
    }
}

/// Collection being administered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name
    pub name: String,

    /// Document field used as the partition key
    pub partition_key: String,
}

/// REST interface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Value of the `x-ms-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Key type placed in the authorization token
    #[serde(default = "default_key_type")]
    pub key_type: String,

    /// Token version placed in the authorization token
    #[serde(default = "default_token_version")]
    pub token_version: String,

    /// Per-request timeout enforced by the HTTP client
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            key_type: default_key_type(),
            token_version: default_token_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.connection.uri.trim().is_empty() {
            return Err(Error::config("connection.uri must not be empty"));
        }

        if self.collection.name.trim().is_empty() {
            return Err(Error::config("collection.name must not be empty"));
        }

        if self.collection.partition_key.trim().is_empty() {
            return Err(Error::config("collection.partition_key must not be empty"));
        }

        if self.service.api_version.trim().is_empty() {
            return Err(Error::config("service.api_version must not be empty"));
        }

        if self.service.timeout_secs == 0 {
            return Err(Error::config(
                "service.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Derive the immutable connection context used by every operation
    pub fn connection_context(&self) -> Result<ConnectionContext> {
        self.validate()?;
        let descriptor = ConnectionDescriptor::parse(&self.connection.uri)?;
        ConnectionContext::from_descriptor(
            &descriptor,
            &self.collection.name,
            &self.collection.partition_key,
        )
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
