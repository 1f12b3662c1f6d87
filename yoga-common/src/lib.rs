//! # Yoga Enhancer Common Library
//!
//! Shared code for the yoga business enhancement tools:
//! - Error and result types
//! - TOML configuration file model and location resolution
//! - Setting priority helpers (CLI → ENV → TOML → default)

pub mod config;
pub mod error;

pub use error::{Error, Result};
