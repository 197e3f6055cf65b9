//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_DATA_DIR, DEFAULT_HTTP_TIMEOUT_SECS};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sheets: SheetsConfig,
    pub cache: CacheConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Remote scripting endpoint configuration
///
/// One base URL plus two optional overrides. Reads go to the read URL,
/// row mutations to the update URL; both fall back to the base URL when
/// not configured, mirroring how the deployment environment is usually
/// set up with a single script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub script_url: String,
    pub read_url: Option<String>,
    pub update_url: Option<String>,
    pub timeout_seconds: u64,
}

/// Sent-quotes cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub data_dir: String,
}

impl SheetsConfig {
    /// URL used for read operations (submissions, vendors, quotations).
    pub fn effective_read_url(&self) -> &str {
        self.read_url.as_deref().unwrap_or(&self.script_url)
    }

    /// URL used for row mutations (stage, selection, approval, PO).
    pub fn effective_update_url(&self) -> &str {
        self.update_url.as_deref().unwrap_or(&self.script_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_addr: DEFAULT_BIND_ADDR.to_string() },
            sheets: SheetsConfig {
                script_url: String::new(),
                read_url: None,
                update_url: None,
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            },
            cache: CacheConfig { data_dir: DEFAULT_DATA_DIR.to_string() },
        }
    }
}
