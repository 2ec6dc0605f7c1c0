//! Common error types for matprice

use thiserror::Error;

/// Common result type for matprice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the record store and configuration loading
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or serialization error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Backing file header lacks one of the canonical columns
    #[error("Missing column in CSV header: {0}")]
    MissingColumn(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
