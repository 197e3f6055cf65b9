//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes standard paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PROCURA_SCRIPT_URL`: Base scripting endpoint URL (required)
//! - `PROCURA_SCRIPT_READ_URL`: Read endpoint override (optional)
//! - `PROCURA_SCRIPT_UPDATE_URL`: Update endpoint override (optional)
//! - `PROCURA_BIND_ADDR`: Server bind address
//! - `PROCURA_DATA_DIR`: Sent-quotes cache directory
//! - `PROCURA_HTTP_TIMEOUT_SECS`: Upstream request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml`
//! 2. `./procura.json` or `./procura.toml`
//! 3. The same names one directory up

use std::path::{Path, PathBuf};

use procura_domain::constants::{DEFAULT_BIND_ADDR, DEFAULT_DATA_DIR, DEFAULT_HTTP_TIMEOUT_SECS};
use procura_domain::{CacheConfig, Config, ProcuraError, Result, ServerConfig, SheetsConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ProcuraError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ProcuraError::Config` if `PROCURA_SCRIPT_URL` is missing or a
/// numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let script_url = env_var("PROCURA_SCRIPT_URL")?;
    let read_url = std::env::var("PROCURA_SCRIPT_READ_URL").ok().filter(|v| !v.is_empty());
    let update_url = std::env::var("PROCURA_SCRIPT_UPDATE_URL").ok().filter(|v| !v.is_empty());

    let bind_addr =
        std::env::var("PROCURA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let data_dir =
        std::env::var("PROCURA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

    let timeout_seconds = match std::env::var("PROCURA_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ProcuraError::Config(format!("Invalid HTTP timeout: {e}")))?,
        Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    Ok(Config {
        server: ServerConfig { bind_addr },
        sheets: SheetsConfig { script_url, read_url, update_url, timeout_seconds },
        cache: CacheConfig { data_dir },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes standard locations. Format is detected by
/// file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ProcuraError::Config` if no file is found or the contents do not
/// parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ProcuraError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ProcuraError::Config(
                "No config file found in any of the standard locations. \
                 Set PROCURA_SCRIPT_URL or provide a config.toml"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ProcuraError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Probe standard config file locations
pub fn probe_config_paths() -> Option<PathBuf> {
    let candidates = [
        "config.json",
        "config.toml",
        "procura.json",
        "procura.toml",
        "../config.json",
        "../config.toml",
        "../procura.json",
        "../procura.toml",
    ];
    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| ProcuraError::Config(format!("Invalid JSON config: {e}")))?,
        Some("toml") => toml::from_str(contents)
            .map_err(|e| ProcuraError::Config(format!("Invalid TOML config: {e}")))?,
        other => {
            return Err(ProcuraError::Config(format!(
                "Unsupported config format: {other:?} (expected .json or .toml)"
            )))
        }
    };

    if config.sheets.script_url.is_empty() {
        return Err(ProcuraError::Config(
            "Config file is missing sheets.script_url. Please set PROCURA_SCRIPT_URL".to_string(),
        ));
    }

    Ok(config)
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ProcuraError::Config(format!("{name} is not set")))
}
