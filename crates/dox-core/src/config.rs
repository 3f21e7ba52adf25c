//! Configuration types for dox.
//!
//! [`Config::load`] reads `~/.config/dox/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
endpoint    = "https://www.ebi.ac.uk/ols4/api/select"
ontologies  = ["efo", "mondo"]
rows        = 40
start       = 0
debounce_ms = 300

[ui]
theme        = "default"
card_columns = 3
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/dox/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// OLS `select` endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Ontologies to restrict the search to, sent comma-joined.
    #[serde(default = "default_ontologies")]
    pub ontologies: Vec<String>,
    /// Maximum number of docs requested per query.
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default)]
    pub start: u32,
    /// Quiet period before a typed query is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_endpoint() -> String { "https://www.ebi.ac.uk/ols4/api/select".to_string() }
fn default_ontologies() -> Vec<String> { vec!["efo".to_string(), "mondo".to_string()] }
fn default_rows() -> u32 { 40 }
fn default_debounce_ms() -> u64 { 300 }

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            ontologies: default_ontologies(),
            rows: default_rows(),
            start: 0,
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Theme name: `default` or `gruvbox`.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Result cards per grid row.
    #[serde(default = "default_card_columns")]
    pub card_columns: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_card_columns() -> u16 { 3 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            card_columns: default_card_columns(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/dox/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dox")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
