//! Configuration resolution for yoga-ai
//!
//! Every setting resolves CLI → ENV → TOML → default. Credentials resolve
//! ENV → TOML and have no default.

use crate::error::{PipelineError, PipelineResult};
use crate::services::batch_controller::{
    BatchConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_COST_USD, DEFAULT_REQUEST_PAUSE_MS,
};
use crate::services::cost::DEFAULT_MODEL;
use crate::services::enhancement_filter::DEFAULT_THRESHOLD;
use crate::services::openai_client::{OpenAiConfig, DEFAULT_TIMEOUT_SECS, OPENAI_API_BASE};
use std::time::Duration;
use tracing::{debug, info, warn};
use yoga_common::config::{is_valid_key, resolve_setting, TomlConfig};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const TIMEOUT_ENV: &str = "OPENAI_TIMEOUT_SECS";
pub const MAX_COST_ENV: &str = "YOGA_ENHANCER_MAX_COST";
pub const BATCH_SIZE_ENV: &str = "YOGA_ENHANCER_BATCH_SIZE";
pub const THRESHOLD_ENV: &str = "YOGA_ENHANCER_THRESHOLD";
pub const REQUEST_PAUSE_ENV: &str = "YOGA_ENHANCER_REQUEST_PAUSE_MS";

/// Local env files, loaded in this order without overriding existing vars
const ENV_FILES: &[&str] = &[".env.local", ".env"];

/// Run settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_cost: Option<f64>,
    pub batch_size: Option<usize>,
    pub threshold: Option<u8>,
    pub request_pause_ms: Option<u64>,
    pub model: Option<String>,
}

/// Load `.env.local` then `.env` from the working directory
pub fn load_env_files() {
    for file in ENV_FILES {
        match dotenvy::from_filename(file) {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable env file {}: {}", file, e),
        }
    }
}

/// `EnvFilter` directive for the configured log level
pub fn log_filter(toml_config: &TomlConfig) -> String {
    let level = toml_config.logging.level.trim();
    format!("yoga_ai={level},yoga_common={level}")
}

/// Resolve the generative service API key
///
/// **Priority:** ENV → TOML
pub fn resolve_api_key(toml_config: &TomlConfig) -> PipelineResult<String> {
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .openai
        .api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "API key found in both environment and TOML config. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("API key loaded from TOML config");
        return Ok(key);
    }

    Err(PipelineError::Credentials(format!(
        "API key not configured. Set {} in the environment or a .env file, \
         or api_key under [openai] in the config file",
        API_KEY_ENV
    )))
}

/// Resolve run parameters
pub fn resolve_batch_config(
    cli: &CliOverrides,
    toml_config: &TomlConfig,
) -> PipelineResult<BatchConfig> {
    let toml = &toml_config.enhancement;

    let max_cost = resolve_setting(cli.max_cost, MAX_COST_ENV, toml.max_cost, DEFAULT_MAX_COST_USD);
    let chunk_size =
        resolve_setting(cli.batch_size, BATCH_SIZE_ENV, toml.batch_size, DEFAULT_CHUNK_SIZE);
    let threshold = resolve_setting(cli.threshold, THRESHOLD_ENV, toml.threshold, DEFAULT_THRESHOLD);
    let pause_ms = resolve_setting(
        cli.request_pause_ms,
        REQUEST_PAUSE_ENV,
        toml.request_pause_ms,
        DEFAULT_REQUEST_PAUSE_MS,
    );

    if !max_cost.is_finite() || max_cost < 0.0 {
        return Err(invalid(format!("max cost must be a non-negative amount, got {}", max_cost)));
    }
    if chunk_size == 0 {
        return Err(invalid("batch size must be at least 1".to_string()));
    }
    if threshold > 100 {
        return Err(invalid(format!("threshold must be 0-100, got {}", threshold)));
    }

    Ok(BatchConfig {
        max_cost,
        chunk_size,
        threshold,
        request_pause: Duration::from_millis(pause_ms),
    })
}

/// Resolve connection settings for the chat service
pub fn resolve_service_config(
    api_key: String,
    cli: &CliOverrides,
    toml_config: &TomlConfig,
) -> OpenAiConfig {
    let toml = &toml_config.openai;

    OpenAiConfig {
        api_key,
        base_url: resolve_setting(
            None,
            BASE_URL_ENV,
            toml.base_url.clone(),
            OPENAI_API_BASE.to_string(),
        ),
        model: resolve_setting(
            cli.model.clone(),
            MODEL_ENV,
            toml.model.clone(),
            DEFAULT_MODEL.to_string(),
        ),
        timeout_secs: resolve_setting(None, TIMEOUT_ENV, toml.timeout_secs, DEFAULT_TIMEOUT_SECS),
    }
}

fn invalid(message: String) -> PipelineError {
    PipelineError::Common(yoga_common::Error::InvalidInput(message))
}
