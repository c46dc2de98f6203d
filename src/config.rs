use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{MatcherOptions, SelectionOrder};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf { PathBuf::from("input.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Number of pairs to report (K)
    #[serde(default = "default_match_count")]
    pub match_count: usize,
    #[serde(default)]
    pub order: SelectionOrder,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub skip_unscorable: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            match_count: default_match_count(),
            order: SelectionOrder::default(),
            parallel: false,
            skip_unscorable: false,
        }
    }
}

impl MatchingSettings {
    pub fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            order: self.order,
            parallel: self.parallel,
            skip_unscorable: self.skip_unscorable,
        }
    }
}

fn default_match_count() -> usize { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LUME__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LUME__MATCHING__MATCH_COUNT -> matching.match_count
            .add_source(lume_environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(lume_environment())
            .build()?
            .try_deserialize()
    }
}

fn lume_environment() -> Environment {
    Environment::with_prefix("LUME")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
