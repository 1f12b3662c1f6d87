//! Configuration loading and config file resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "YOGA_ENHANCER_CONFIG";

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "yoga-enhancer";

/// Bootstrap configuration loaded from TOML file
///
/// Every section is optional. A missing file yields `TomlConfig::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Generative service connection settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Batch enhancement settings
    #[serde(default)]
    pub enhancement: EnhancementConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[openai]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[enhancement]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnhancementConfig {
    /// Cost ceiling in USD
    pub max_cost: Option<f64>,
    /// Records per chunk
    pub batch_size: Option<usize>,
    /// Completeness threshold below which a record is enhanced
    pub threshold: Option<u8>,
    /// Pause between service calls
    pub request_pause_ms: Option<u64>,
}

/// Locate the TOML config file
///
/// **Priority:** explicit path → `YOGA_ENHANCER_CONFIG` → `<config_dir>/yoga-enhancer/config.toml`
///
/// Returns `None` when no candidate exists on disk. An explicit path is
/// returned even if missing so the caller reports it.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
        .filter(|p| p.exists())
}

/// Load TOML configuration
///
/// `None` means no file was found and defaults apply.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        debug!("No config file found, using built-in defaults");
        return Ok(TomlConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Read config file {} failed: {}", path.display(), e))
    })?;
    let config: TomlConfig = toml::from_str(&content)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve a single setting through CLI → ENV → TOML → default
///
/// Unparseable environment values are ignored with a warning.
pub fn resolve_setting<T>(
    cli_value: Option<T>,
    env_var_name: &str,
    toml_value: Option<T>,
    default: T,
) -> T
where
    T: FromStr,
{
    if let Some(value) = cli_value {
        return value;
    }

    if let Ok(raw) = std::env::var(env_var_name) {
        match raw.trim().parse::<T>() {
            Ok(value) => return value,
            Err(_) => warn!(
                "Ignoring unparseable environment variable {}={:?}",
                env_var_name, raw
            ),
        }
    }

    toml_value.unwrap_or(default)
}

/// Validate a credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
