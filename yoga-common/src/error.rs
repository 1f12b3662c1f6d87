//! Common error types for the yoga enhancer tools

use thiserror::Error;

/// Common result type for yoga enhancer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the enhancer crates
#[derive(Error, Debug)]
pub enum Error {
    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or command-line parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
