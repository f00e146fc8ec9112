//! Configuration management for the manifest builder
//!
//! This module handles loading, validating, and providing access to the
//! tool configuration: where the corpus text came from (recorded as
//! provenance), how chapter identifiers are labeled, where manifests are
//! written, and the log level. The cryptographic parameters of the scheme
//! (hash algorithm, normalization form, nonce encoding, modulus) are
//! intentionally NOT configurable; they are fixed public constants of the
//! crate and are embedded in every manifest.

mod error;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Re-export the error type
pub use error::ConfigError;

/// Main configuration structure for the manifest builder.
///
/// Loadable from a TOML file or created programmatically. A missing file
/// falls back to defaults; a present-but-invalid file is an error, never
/// silently ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Corpus source description, recorded verbatim in manifest provenance.
    pub source: SourceConfig,

    /// Output location configuration.
    pub output: OutputConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Describes the corpus being sealed. Provenance, not retrieval: fetching
/// the text is a separate tool's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Work identifier used in chapter error context (e.g. "QURAN").
    pub work_id: String,
    /// Source name recorded in provenance (e.g. "Tanzil").
    pub name: String,
    /// Edition/version tag recorded in provenance.
    pub edition: String,
    /// Prefix prepended to chapter numbers to form chapter identifiers
    /// (e.g. "Sura " yields "Sura 1").
    pub chapter_prefix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            work_id: "QURAN".to_string(),
            name: "Tanzil".to_string(),
            edition: "Uthmani (UTF-8)".to_string(),
            chapter_prefix: "Sura ".to_string(),
        }
    }
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory manifests are written into.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "./out".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter: error, warn, info, debug or trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            log::debug!(
                "config file {} not found, using defaults",
                path.display()
            );
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.work_id.trim().is_empty() {
            return Err(ConfigError::validation_error(
                "source.work_id must not be empty",
            ));
        }
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::validation_error(
                "output.dir must not be empty",
            ));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(ConfigError::invalid_value(
                "logging.level",
                other,
                "expected one of: error, warn, info, debug, trace",
            )),
        }
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
