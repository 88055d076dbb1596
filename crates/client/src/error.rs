use colladmin_core::Error as CoreError;
use thiserror::Error;

/// Failures below the HTTP response level
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<TransportError> for CoreError {
    fn from(err: TransportError) -> Self {
        CoreError::transport(err.to_string())
    }
}
