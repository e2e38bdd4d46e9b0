//! Output sinks
//!
//! A `Sink` is the host's three-channel text output. Writing to it is only
//! allowed from the thread that owns the host loop, which is expressed by
//! taking `&mut dyn Sink` wherever lines are written.

use super::Severity;
use std::io::{self, Write};

/// Host text output with one channel per severity
pub trait Sink {
    fn info(&mut self, line: &str);
    fn warning(&mut self, line: &str);
    fn error(&mut self, line: &str);

    /// Route a line to the channel matching `severity`
    fn write(&mut self, severity: Severity, line: &str) {
        match severity {
            Severity::Error => self.error(line),
            Severity::Warning => self.warning(line),
            Severity::Info => self.info(line),
        }
    }
}

/// Chat/command channel used to answer commands
pub trait CommandChannel {
    fn post(&mut self, text: &str);
}

/// Console sink: info to stdout, warnings and errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn emit(mut out: impl Write, prefix: &str, line: &str) {
        // A closed console must not take the host loop down.
        let _ = writeln!(out, "{}{}", prefix, line);
    }
}

impl Sink for ConsoleSink {
    fn info(&mut self, line: &str) {
        Self::emit(io::stdout().lock(), "", line);
    }

    fn warning(&mut self, line: &str) {
        Self::emit(io::stderr().lock(), "Warning: ", line);
    }

    fn error(&mut self, line: &str) {
        Self::emit(io::stderr().lock(), "Error: ", line);
    }
}

/// Console command channel, answers printed as server messages on stdout
#[derive(Debug, Default)]
pub struct ConsoleChannel;

impl CommandChannel for ConsoleChannel {
    fn post(&mut self, text: &str) {
        let _ = writeln!(io::stdout().lock(), "[server] {}", text);
    }
}

/// In-memory sink keeping every line per channel, in arrival order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines received on one channel
    pub fn lines(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        }
    }

    pub fn total(&self) -> usize {
        self.infos.len() + self.warnings.len() + self.errors.len()
    }
}

impl Sink for MemorySink {
    fn info(&mut self, line: &str) {
        self.infos.push(line.to_string());
    }

    fn warning(&mut self, line: &str) {
        self.warnings.push(line.to_string());
    }

    fn error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }
}

/// In-memory command channel
#[derive(Debug, Default, Clone)]
pub struct RecordingChannel {
    pub posts: Vec<String>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandChannel for RecordingChannel {
    fn post(&mut self, text: &str) {
        self.posts.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_routes_by_severity() {
        let mut sink = MemorySink::new();
        sink.write(Severity::Error, "e");
        sink.write(Severity::Warning, "w");
        sink.write(Severity::Info, "i");

        assert_eq!(sink.lines(Severity::Error), ["e"]);
        assert_eq!(sink.lines(Severity::Warning), ["w"]);
        assert_eq!(sink.lines(Severity::Info), ["i"]);
        assert_eq!(sink.total(), 3);
    }

    #[test]
    fn test_recording_channel_keeps_order() {
        let mut channel = RecordingChannel::new();
        channel.post("first");
        channel.post("second");
        assert_eq!(channel.posts, vec!["first", "second"]);
    }
}
