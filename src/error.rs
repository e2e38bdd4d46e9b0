//! Centralized error types for modlog
//!
//! All modlog errors are represented by the `ModLogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, ModLogError>`.

use crate::logging::Severity;
use std::fmt;
use std::path::PathBuf;

/// All modlog errors
#[derive(Debug)]
pub enum ModLogError {
    // === Level gate ===
    /// Level index falls outside the 31-bit mask once offset into its band
    LevelOutOfRange {
        severity: Severity,
        level: i32,
        /// Highest valid band-relative level for `severity`
        max: i32,
    },

    // === Config ===
    /// Config file could not be read
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for `Config`
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Host harness ===
    /// Tokio runtime creation failed
    Runtime { source: std::io::Error },
    /// Host-side I/O failed (stdin, console)
    Io {
        context: &'static str,
        source: std::io::Error,
    },
}

impl std::error::Error for ModLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::Runtime { source }
            | Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ModLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOutOfRange {
                severity,
                level,
                max,
            } => write!(
                f,
                "{} level {} out of range, must be between 0 and {}",
                severity, level, max
            ),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Runtime { .. } => write!(f, "Failed to create runtime"),
            Self::Io { context, .. } => write!(f, "Failed to {}", context),
        }
    }
}

impl ModLogError {
    /// Message followed by each underlying cause, `outer: inner`
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

/// Alias for Result with ModLogError
pub type Result<T> = std::result::Result<T, ModLogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_level_out_of_range_message() {
        let err = ModLogError::LevelOutOfRange {
            severity: Severity::Info,
            level: 99,
            max: 20,
        };
        assert_eq!(
            err.to_string(),
            "info level 99 out of range, must be between 0 and 20"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_exposes_source() {
        let err = ModLogError::Io {
            context: "read stdin",
            source: std::io::Error::other("closed"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to read stdin");
        assert_eq!(err.report(), "Failed to read stdin: closed");
    }

    #[test]
    fn test_report_is_readable_without_cause() {
        let err = ModLogError::ConfigValidation {
            field: "levels",
            reason: "error_levels + warning_levels must be below 31".into(),
        };
        assert_eq!(
            err.report(),
            "Invalid levels: error_levels + warning_levels must be below 31"
        );
    }
}
