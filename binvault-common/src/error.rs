//! Common error types for BinVault

use thiserror::Error;

/// Common result type for BinVault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across the BinVault crates
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or request parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials or missing/expired session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persisted medium unreadable or unparseable at load
    #[error("Storage corruption: {0}")]
    StorageCorruption(String),

    /// Failed persist during a mutation; the mutation is not committed
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
