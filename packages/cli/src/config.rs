//! Layered configuration for the crash map tool.
//!
//! The embedded `config/default.toml` is the base layer. A user file passed
//! with `--config` is merged over it key by key, and command-line flags are
//! applied last via [`ConfigOverrides`].

use std::path::{Path, PathBuf};

use crash_map_crash_models::GeoBounds;
use crash_map_render::MapOptions;
use serde::Deserialize;

/// Base configuration embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Values parsed but are out of range.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrashMapConfig {
    /// Crash CSV to read.
    pub input: PathBuf,
    /// HTML file to write.
    pub output: PathBuf,
    /// `FIRST_CRASH_TYPE` value to map.
    pub crash_type: String,
    /// Coordinates outside this box are discarded.
    pub bounds: GeoBounds,
    /// Map page settings.
    pub map: MapOptions,
}

/// Command-line values that take precedence over config files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub crash_type: Option<String>,
}

impl CrashMapConfig {
    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(crash_type) = overrides.crash_type {
            self.crash_type = crash_type;
        }
        self
    }

    /// Checks value ranges that TOML types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.bounds;
        if b.min_latitude > b.max_latitude || b.min_longitude > b.max_longitude {
            return Err(ConfigError::Invalid {
                message: format!(
                    "bounds are inverted: lat [{}, {}], lng [{}, {}]",
                    b.min_latitude, b.max_latitude, b.min_longitude, b.max_longitude
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.map.fill_opacity) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "map.fill_opacity must be within 0..=1, got {}",
                    self.map.fill_opacity
                ),
            });
        }
        if self.crash_type.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "crash_type must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Recursively merges `overlay` into `base`. Tables merge key by key; any
/// other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Parses the embedded defaults with `overlay` TOML merged on top.
///
/// # Errors
///
/// Returns [`ConfigError`] if either document is invalid.
pub fn parse_config(overlay: Option<&str>) -> Result<CrashMapConfig, ConfigError> {
    let mut table: toml::Table = DEFAULT_CONFIG_TOML.parse()?;
    if let Some(overlay) = overlay {
        merge_tables(&mut table, overlay.parse()?);
    }
    let config: CrashMapConfig = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration, merging the file at `path` (if any) over the
/// embedded defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> Result<CrashMapConfig, ConfigError> {
    let Some(path) = path else {
        return parse_config(None);
    };

    log::debug!("Reading config from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(Some(&contents))
}
