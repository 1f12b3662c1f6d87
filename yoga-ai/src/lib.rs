//! yoga-ai library interface
//!
//! AI enhancement pipeline for the yoga business dataset. Exposes public
//! APIs for the binary and for integration testing.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{EnhanceError, PipelineError, PipelineResult};

/// Build identification line logged at startup
pub fn build_info() -> String {
    format!(
        "yoga-ai {} ({}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}
