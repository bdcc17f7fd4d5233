use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{CampaignError, Result};

/// Main configuration for CampaignIQ, loaded from `campaigniq.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server bind settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Chunking and pacing of the streamed response
    #[serde(default)]
    pub streaming: StreamingConfig,

    /// Recommendation generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// How the report text is cut into emission units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkPolicy {
    /// One event per whitespace-separated word
    Word,
    /// One event per line
    Line,
    /// One event per blank-line-separated section
    Section,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Emission granularity: "word", "line" or "section"
    #[serde(default = "default_chunking")]
    pub chunking: ChunkPolicy,

    /// Delay after an ordinary unit
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Delay after a unit containing a line break
    #[serde(default = "default_newline_delay_ms")]
    pub newline_delay_ms: u64,

    /// Delay after a unit containing a Markdown heading marker
    #[serde(default = "default_heading_delay_ms")]
    pub heading_delay_ms: u64,

    /// Delay after a unit containing a code-fence delimiter
    #[serde(default = "default_fence_delay_ms")]
    pub fence_delay_ms: u64,

    /// Delay after a unit containing a table pipe
    #[serde(default = "default_table_delay_ms")]
    pub table_delay_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunking: default_chunking(),
            base_delay_ms: default_base_delay_ms(),
            newline_delay_ms: default_newline_delay_ms(),
            heading_delay_ms: default_heading_delay_ms(),
            fence_delay_ms: default_fence_delay_ms(),
            table_delay_ms: default_table_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed. Unset means fresh OS entropy per request.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Env-filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_chunking() -> ChunkPolicy {
    ChunkPolicy::Word
}

fn default_base_delay_ms() -> u64 {
    30
}

fn default_newline_delay_ms() -> u64 {
    100
}

fn default_heading_delay_ms() -> u64 {
    150
}

fn default_fence_delay_ms() -> u64 {
    80
}

fn default_table_delay_ms() -> u64 {
    50
}

fn default_log_filter() -> String {
    "campaigniq_api=debug,tower_http=debug".to_string()
}

impl Settings {
    /// Load settings from `CAMPAIGNIQ_CONFIG` or `./campaigniq.toml`,
    /// falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CAMPAIGNIQ_CONFIG")
            .unwrap_or_else(|_| "campaigniq.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&raw)
            .map_err(|e| CampaignError::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
