//! Library interface for the colladmin CLI
//!
//! This module exposes the command handlers for integration testing while
//! keeping argument parsing and process setup in main.rs.

pub mod commands;

// Re-export commonly needed types for tests
pub use anyhow::Result;
pub use colladmin_core::config::Config;
