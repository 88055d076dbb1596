use thiserror::Error;

/// Result type for colladmin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for colladmin operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service answered with a non-success status
    #[error("Connection error (status {status}): {body}")]
    Connection { status: u16, body: String },

    /// A lookup succeeded at the HTTP level but matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The master key is not valid base64
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Entity could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error from a response status and body
    pub fn connection(status: u16, body: impl Into<String>) -> Self {
        Self::Connection {
            status,
            body: body.into(),
        }
    }

    /// Creates a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates an invalid key format error
    pub fn invalid_key_format(msg: impl Into<String>) -> Self {
        Self::InvalidKeyFormat(msg.into())
    }

    /// Creates a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for [`Error::Connection`]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Response status for [`Error::Connection`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Connection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
