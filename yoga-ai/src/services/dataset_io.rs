//! Dataset snapshot I/O
//!
//! The input file is read once and never modified; the output is a new
//! pretty-printed file.

use crate::error::{PipelineError, PipelineResult};
use crate::models::{BusinessRecord, InputDocument, OutputDocument};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_FILE: &str = "yoga_businesses_enriched_full.json";

pub fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

/// `yoga_businesses_enhanced_<YYYYmmdd_HHMMSS>.json`
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "yoga_businesses_enhanced_{}.json",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Load the `businesses` array of an input document
pub fn load_dataset(path: &Path) -> PipelineResult<Vec<BusinessRecord>> {
    let input_missing = |reason: String| PipelineError::InputMissing {
        path: path.to_path_buf(),
        reason,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| input_missing(e.to_string()))?;
    let document: InputDocument =
        serde_json::from_str(&raw).map_err(|e| input_missing(format!("Invalid JSON: {}", e)))?;

    tracing::info!(
        path = %path.display(),
        records = document.businesses.len(),
        "Loaded dataset"
    );

    Ok(document.businesses)
}

/// Write `document` as pretty UTF-8 JSON
pub fn write_dataset(path: &Path, document: &OutputDocument) -> PipelineResult<()> {
    let write_failure = |reason: String| PipelineError::OutputWriteFailure {
        path: path.to_path_buf(),
        reason,
    };

    let json = serde_json::to_string_pretty(document).map_err(|e| write_failure(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| write_failure(e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        records = document.businesses.len(),
        "Wrote enhanced dataset"
    );

    Ok(())
}
