//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.farmcopilot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::http::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FarmConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub greeting: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GREETING: &str = "Hello! Please upload a document to begin.";
pub const BACKEND_URL_ENV: &str = "FARMCOPILOT_BACKEND_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub request_timeout: Option<Duration>,
    pub greeting: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.farmcopilot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".farmcopilot").join("config.toml"))
}

/// Load config from `~/.farmcopilot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FarmConfig::default()`.
pub fn load_config() -> Result<FarmConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(FarmConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FarmConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path. Malformed TOML is `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<FarmConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FarmConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# FarmCopilot Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8000"    # Or set FARMCOPILOT_BACKEND_URL
# request_timeout_secs = 120            # Unset = wait indefinitely

# [ui]
# greeting = "Hello! Please upload a document to begin."
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FarmConfig, cli_backend_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_backend_url, std::env::var(BACKEND_URL_ENV).ok())
}

/// Same as [`resolve`], with the environment value passed in explicitly.
fn resolve_with_env(
    config: &FarmConfig,
    cli_backend_url: Option<&str>,
    env_backend_url: Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli_backend_url
        .map(str::to_string)
        .or(env_backend_url)
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Zero means "no timeout", same as leaving it unset
    let request_timeout = config
        .backend
        .request_timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let greeting = config
        .ui
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    let resolved = ResolvedConfig {
        backend_url,
        request_timeout,
        greeting,
    };
    info!(
        "Resolved config: backend={}, timeout={:?}",
        resolved.backend_url, resolved.request_timeout
    );
    resolved
}
