//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Default origins allowed by CORS: the server itself and a local live-reload server.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5000,http://127.0.0.1:5500";

/// Task file used when `DATA_FILE` is unset.
const DEFAULT_DATA_FILE: &str = "data/todos.json";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied every time the task list is cached
    pub cache_ttl: u64,
    /// Background cache cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Maximum accepted request body size in bytes
    pub body_limit: usize,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Directory with the browser client, served as fallback
    pub static_dir: Option<PathBuf>,
    /// JSON file holding the tasks; `None` keeps them in memory only
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `CACHE_TTL` - Task list cache TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Cache cleanup frequency in seconds (default: 60)
    /// - `BODY_LIMIT` - Request body limit in bytes (default: 10240)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origins
    /// - `STATIC_DIR` - Browser client directory (default: `public` when present)
    /// - `DATA_FILE` - Task file (default: `data/todos.json`, empty for in-memory)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            body_limit: parse_var("BODY_LIMIT").unwrap_or(defaults.body_limit),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let public = PathBuf::from("public");
                    public.is_dir().then_some(public)
                }),
            data_file: data_file_from(env::var("DATA_FILE").ok()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            cache_ttl: 3600,
            cleanup_interval: 60,
            body_limit: 10 * 1024,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            static_dir: None,
            data_file: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn data_file_from(raw: Option<String>) -> Option<PathBuf> {
    match raw {
        None => Some(PathBuf::from(DEFAULT_DATA_FILE)),
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(PathBuf::from(v)),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
