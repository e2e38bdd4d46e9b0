//! Logging service
//!
//! One long-lived `ModLogService` owns the level gate, the deferred queues and
//! the clock. It is created by the addon lifecycle and shared through `Arc`
//! with every `ModLogger` and with the command interpreter.

use crate::config::{Config, ServiceConfig};
use crate::error::Result;
use crate::logging::{
    format_line, Clock, DeferredQueues, FlushStats, HostClock, LevelGate, Severity, Sink,
};
use std::sync::Arc;
use tracing::debug;

pub struct ModLogService {
    gate: LevelGate,
    queues: DeferredQueues,
    clock: Clock,
    config: ServiceConfig,
}

impl ModLogService {
    /// Start the service: capture the epoch, enable the default levels on the
    /// built-in handle and queue the sanity messages.
    ///
    /// Must be called on the host's main thread, since it reads `host`.
    pub fn start(config: &Config, host: &dyn HostClock) -> Result<Arc<Self>> {
        config.validate()?;
        let bands = config.levels.bands()?;

        let service = Self {
            gate: LevelGate::new(bands),
            queues: DeferredQueues::new(),
            clock: Clock::start(host),
            config: config.service.clone(),
        };

        let handle = service.config.default_handle.as_str();
        for severity in Severity::ALL {
            service
                .gate
                .set_levels(handle, severity, &service.config.default_levels, true)?;
        }

        if service.config.sanity_messages {
            service.log(handle, Severity::Info, 0, "Sanity info");
            service.log(handle, Severity::Warning, 0, "Sanity warning");
            service.log(handle, Severity::Error, 0, "Sanity error");
        }

        debug!(
            epoch = %service.clock.epoch(),
            handle,
            "logging service started"
        );
        Ok(Arc::new(service))
    }

    pub fn gate(&self) -> &LevelGate {
        &self.gate
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Built-in handle for the service's own messages
    pub fn default_handle(&self) -> &str {
        &self.config.default_handle
    }

    pub fn is_active(&self, handle: &str, severity: Severity, level: i32) -> bool {
        self.gate.is_level_active(handle, severity, level)
    }

    /// Format a line stamped with the current elapsed time
    pub fn format(&self, handle: &str, severity: Severity, level: i32, message: &str) -> String {
        format_line(
            self.clock.now(),
            handle,
            severity,
            level,
            message,
            self.config.severity_tags,
        )
    }

    /// Deferred path: queue the line if the level is active. Any thread.
    ///
    /// Returns whether the message passed the gate.
    pub fn log(&self, handle: &str, severity: Severity, level: i32, message: &str) -> bool {
        self.log_with(handle, severity, level, || message.to_string())
    }

    /// Deferred path with the message built only when the level is active
    pub fn log_with(
        &self,
        handle: &str,
        severity: Severity,
        level: i32,
        message: impl FnOnce() -> String,
    ) -> bool {
        if !self.is_active(handle, severity, level) {
            return false;
        }
        let line = self.format(handle, severity, level, &message());
        self.queues.enqueue(severity, line);
        true
    }

    /// Direct path: write straight to the sink, bypassing the queues.
    ///
    /// Only the thread that owns `sink` can call this, which in a host is the
    /// main thread.
    pub fn log_direct(
        &self,
        sink: &mut dyn Sink,
        handle: &str,
        severity: Severity,
        level: i32,
        message: &str,
    ) -> bool {
        if !self.is_active(handle, severity, level) {
            return false;
        }
        sink.write(severity, &self.format(handle, severity, level, message));
        true
    }

    /// Drain the deferred queues into `sink`. Main thread only.
    pub fn flush(&self, sink: &mut dyn Sink) -> FlushStats {
        self.queues.flush(sink)
    }

    /// Lines waiting across all three queues
    pub fn pending(&self) -> usize {
        Severity::ALL
            .iter()
            .map(|s| self.queues.pending(*s))
            .sum()
    }
}
