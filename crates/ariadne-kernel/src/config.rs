//! Configuration loading from `~/.ariadne/config.toml` with defaults.

use ariadne_types::config::AgentConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a configuration was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file.
    File,
    /// No file at the path; defaults used.
    Missing,
    /// The file could not be read or parsed; defaults used.
    Invalid(String),
}

/// A configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AgentConfig,
    pub path: PathBuf,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Report how the configuration was obtained.
    ///
    /// Callers that install a subscriber after reading the config call this
    /// once the subscriber is up.
    pub fn log(&self) {
        match &self.source {
            ConfigSource::File => {
                info!(path = %self.path.display(), "Loaded configuration");
            }
            ConfigSource::Missing => {
                info!(
                    path = %self.path.display(),
                    "Config file not found, using defaults"
                );
            }
            ConfigSource::Invalid(error) => {
                warn!(
                    error = %error,
                    path = %self.path.display(),
                    "Failed to load config, using defaults"
                );
            }
        }
    }
}

/// Read agent configuration from a TOML file without logging.
///
/// A missing, unreadable or invalid file never fails: the defaults are used
/// and the reason is kept in [`LoadedConfig::source`].
pub fn read_config(path: Option<&Path>) -> LoadedConfig {
    let config_path = path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(default_config_path);

    let fallback = |source| LoadedConfig {
        config: AgentConfig::default(),
        path: config_path.clone(),
        source,
    };

    if !config_path.exists() {
        return fallback(ConfigSource::Missing);
    }

    let contents = match std::fs::read_to_string(&config_path) {
        Ok(contents) => contents,
        Err(e) => return fallback(ConfigSource::Invalid(e.to_string())),
    };

    match toml::from_str::<AgentConfig>(&contents) {
        Ok(config) => LoadedConfig {
            config,
            path: config_path.clone(),
            source: ConfigSource::File,
        },
        Err(e) => fallback(ConfigSource::Invalid(e.to_string())),
    }
}

/// Load agent configuration from a TOML file, with defaults.
///
/// Same as [`read_config`], but reports the outcome immediately.
pub fn load_config(path: Option<&Path>) -> AgentConfig {
    let loaded = read_config(path);
    loaded.log();
    loaded.config
}

/// The Ariadne home directory (`~/.ariadne`).
pub fn ariadne_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".ariadne")
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    ariadne_home().join("config.toml")
}
