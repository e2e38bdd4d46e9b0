//! Configuration management
//!
//! Optional TOML file, every section and field defaulted. Runtime level
//! changes made through commands are never written back.

use crate::constants::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_DEMO_INTERVAL_MS, DEFAULT_ERROR_LEVELS,
    DEFAULT_FRAME_INTERVAL_MS, DEFAULT_HANDLE, DEFAULT_HANDLE_LEVELS, DEFAULT_WARNING_LEVELS,
    DIAGNOSTIC_LEVEL,
};
use crate::error::{ModLogError, Result};
use crate::logging::Bands;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub levels: LevelsConfig,
    pub service: ServiceConfig,
    pub host: HostConfig,
}

/// Band layout of the level mask
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelsConfig {
    /// Number of error levels (bits 0..error_levels)
    pub error_levels: i32,
    /// Number of warning levels, following the error band
    pub warning_levels: i32,
}

/// Logging service behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Commands must start with `/<command_prefix>` (case-insensitive)
    pub command_prefix: String,
    /// Handle used for the service's own messages
    pub default_handle: String,
    /// Levels enabled on `default_handle` in every band at startup
    pub default_levels: Vec<i32>,
    /// Include the I/W/E tag in formatted lines
    pub severity_tags: bool,
    /// Queue one message per severity when the service starts
    pub sanity_messages: bool,
    /// Info level used for rejected-command diagnostics
    pub diagnostic_level: i32,
}

/// Host harness settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Frame duration in milliseconds; the queues are flushed once per frame
    pub frame_interval_ms: u64,
    /// Background threads logging through a `ModLogger` (0 = none)
    pub demo_producers: usize,
    /// Interval between demo messages (milliseconds)
    pub demo_interval_ms: u64,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            error_levels: DEFAULT_ERROR_LEVELS,
            warning_levels: DEFAULT_WARNING_LEVELS,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            default_handle: DEFAULT_HANDLE.to_string(),
            default_levels: DEFAULT_HANDLE_LEVELS.to_vec(),
            severity_tags: true,
            sanity_messages: true,
            diagnostic_level: DIAGNOSTIC_LEVEL,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            demo_producers: 0,
            demo_interval_ms: DEFAULT_DEMO_INTERVAL_MS,
        }
    }
}

impl LevelsConfig {
    pub fn bands(&self) -> Result<Bands> {
        Bands::new(self.error_levels, self.warning_levels)
    }
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let bands = self.levels.bands()?;

        let prefix = &self.service.command_prefix;
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ModLogError::ConfigValidation {
                field: "command_prefix",
                reason: format!("must be a single non-empty word, got {:?}", prefix),
            });
        }
        if self.service.default_handle.trim().is_empty() {
            return Err(ModLogError::ConfigValidation {
                field: "default_handle",
                reason: "must not be empty".into(),
            });
        }
        for &level in &self.service.default_levels {
            for severity in crate::logging::Severity::ALL {
                bands.checked_absolute(severity, level).map_err(|e| {
                    ModLogError::ConfigValidation {
                        field: "default_levels",
                        reason: e.to_string(),
                    }
                })?;
            }
        }
        bands
            .checked_absolute(crate::logging::Severity::Info, self.service.diagnostic_level)
            .map_err(|e| ModLogError::ConfigValidation {
                field: "diagnostic_level",
                reason: e.to_string(),
            })?;
        if self.host.frame_interval_ms == 0 {
            return Err(ModLogError::ConfigValidation {
                field: "frame_interval_ms",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

/// Load and validate config, reporting every failure
///
/// A missing file is not an error and yields defaults.
pub fn load_strict(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ModLogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| ModLogError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load config from file, falling back to defaults on any error
pub fn load(path: &Path) -> Config {
    match load_strict(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e.report());
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
