//! Error types for starfield

use thiserror::Error;

/// Main error type for starfield operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for starfield operations
pub type Result<T> = std::result::Result<T, Error>;
