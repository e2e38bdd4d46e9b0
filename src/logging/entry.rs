//! Severity and line formatting
//!
//! Messages are formatted eagerly, when they are logged, so the queued value is
//! just the final line.

use std::fmt;

/// Severity band of a message. Each band owns its own range of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// All severities in flush order
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Canonical keyword used on the command channel
    pub fn keyword(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// One-letter tag used in formatted lines
    pub fn tag(self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
            Severity::Info => 'I',
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Format a line as `<elapsed> [<handle>] {<tag> <level>} <message>`
///
/// `handle` is written as the caller supplied it, not lowercased. With
/// `severity_tags` off the braces only hold the level.
pub fn format_line(
    elapsed: f64,
    handle: &str,
    severity: Severity,
    level: i32,
    message: &str,
    severity_tags: bool,
) -> String {
    if severity_tags {
        format!(
            "{:.3} [{}] {{{} {}}} {}",
            elapsed,
            handle,
            severity.tag(),
            level,
            message
        )
    } else {
        format!("{:.3} [{}] {{{}}} {}", elapsed, handle, level, message)
    }
}
