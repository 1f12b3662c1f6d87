//! Error types for yoga-ai
//!
//! Two layers:
//! - [`EnhanceError`]: per-record failures from the enhancement client. The
//!   batch controller contains these; they never abort a run.
//! - [`PipelineError`]: run-level failures that end the process.

use std::path::PathBuf;
use thiserror::Error;

/// Per-record enhancement failure
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// Reply was not a JSON object matching the expected schema
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// Network, auth, rate-limit or any other call-level error
    #[error("Service failure: {0}")]
    ServiceFailure(String),
}

/// Run-level error
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file absent, unreadable or not a dataset document
    #[error("Input missing or unreadable: {path}: {reason}")]
    InputMissing { path: PathBuf, reason: String },

    /// Output file could not be written
    #[error("Failed to write output {path}: {reason}")]
    OutputWriteFailure { path: PathBuf, reason: String },

    /// No usable credentials for the generative service
    #[error("Credentials missing: {0}")]
    Credentials(String),

    /// yoga-common error
    #[error("Common error: {0}")]
    Common(#[from] yoga_common::Error),
}

/// Result type for run-level operations
pub type PipelineResult<T> = Result<T, PipelineError>;
