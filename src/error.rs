// src/error.rs

use thiserror::Error;

/// Core error types for regver
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required `Label: value` line was not present
    #[error("Attribute '{0}' not found")]
    MissingAttribute(String),

    /// Version string could not be parsed
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Version specifier could not be parsed
    #[error("Invalid version specifier: {0}")]
    InvalidSpecifier(String),
}

/// Result type alias using regver's Error type
pub type Result<T> = std::result::Result<T, Error>;
