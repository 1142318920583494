//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default idle timeout before a session is swept, in seconds
pub const DEFAULT_SESSION_TIMEOUT_S: u64 = 300;

/// Default cadence of the background sweep, in seconds
pub const DEFAULT_SWEEP_INTERVAL_S: u64 = 60;

/// Default minimum cosine score for a dataset response to be used
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.35;

/// Reply used when no dataset response is similar enough
pub const DEFAULT_FALLBACK_RESPONSE: &str = "Maaf, saya tidak memahami pertanyaan Anda.";

/// Root configuration for petpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Session store configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// NLP collaborator configuration
    #[serde(default)]
    pub nlp: NlpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle seconds after which a session is removed by the sweeper
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Seconds between two sweep passes
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
    /// Maximum exchanges kept per session; oldest are dropped first.
    /// Unbounded when absent.
    #[serde(default)]
    pub max_history: Option<usize>,
}

fn default_timeout() -> u64 {
    DEFAULT_SESSION_TIMEOUT_S
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_S
}

impl SessionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            sweep_interval_secs: default_sweep_interval(),
            max_history: None,
        }
    }
}

/// NLP collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    /// JSON dataset with utterances, responses and optional annotations
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    /// Minimum cosine similarity for a dataset response to be returned
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Reply used when nothing in the dataset is similar enough
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,
}

fn default_dataset_path() -> String {
    "dataset/dataaa.json".to_string()
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_fallback_response() -> String {
    DEFAULT_FALLBACK_RESPONSE.to_string()
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            similarity_threshold: default_similarity_threshold(),
            fallback_response: default_fallback_response(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}
