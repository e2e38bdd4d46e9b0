//! Per-caller logging facade
//!
//! A `ModLogger` binds a default handle to the shared service so call sites
//! don't repeat the handle string. Every log call takes the deferred path and
//! is safe from any thread.

use crate::error::Result;
use crate::logging::Severity;
use crate::service::ModLogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ModLogger {
    service: Arc<ModLogService>,
    handle: String,
}

impl ModLogger {
    pub fn new(service: Arc<ModLogService>, name: impl Into<String>) -> Self {
        Self {
            service,
            handle: name.into(),
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn service(&self) -> &Arc<ModLogService> {
        &self.service
    }

    /// Same service, different handle
    pub fn with_handle(&self, handle: impl Into<String>) -> Self {
        Self::new(self.service.clone(), handle)
    }

    pub fn is_active(&self, severity: Severity, level: i32) -> bool {
        self.service.is_active(&self.handle, severity, level)
    }

    // === Logging ===

    pub fn log(&self, severity: Severity, level: i32, message: &str) -> bool {
        self.service.log(&self.handle, severity, level, message)
    }

    /// Log with a lazily built message, see `modlog_info!` and friends
    pub fn log_with(
        &self,
        severity: Severity,
        level: i32,
        message: impl FnOnce() -> String,
    ) -> bool {
        self.service.log_with(&self.handle, severity, level, message)
    }

    pub fn info(&self, message: &str) -> bool {
        self.log(Severity::Info, 0, message)
    }

    pub fn warning(&self, message: &str) -> bool {
        self.log(Severity::Warning, 0, message)
    }

    pub fn error(&self, message: &str) -> bool {
        self.log(Severity::Error, 0, message)
    }

    pub fn info_at(&self, level: i32, message: &str) -> bool {
        self.log(Severity::Info, level, message)
    }

    pub fn warning_at(&self, level: i32, message: &str) -> bool {
        self.log(Severity::Warning, level, message)
    }

    pub fn error_at(&self, level: i32, message: &str) -> bool {
        self.log(Severity::Error, level, message)
    }

    // === Levels ===

    /// Enable or disable levels on this logger's handle (not transactional)
    pub fn set_levels(&self, severity: Severity, levels: &[i32], enable: bool) -> Result<()> {
        self.service
            .gate()
            .set_levels(&self.handle, severity, levels, enable)
    }

    pub fn set_info_levels(&self, levels: &[i32], enable: bool) -> Result<()> {
        self.set_levels(Severity::Info, levels, enable)
    }

    pub fn set_warning_levels(&self, levels: &[i32], enable: bool) -> Result<()> {
        self.set_levels(Severity::Warning, levels, enable)
    }

    pub fn set_error_levels(&self, levels: &[i32], enable: bool) -> Result<()> {
        self.set_levels(Severity::Error, levels, enable)
    }
}

/// Log at an info level, formatting only if the level is active
///
/// `modlog_info!(logger, 2, "loaded {} parts", n)`
#[macro_export]
macro_rules! modlog_info {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log_with($crate::logging::Severity::Info, $level, || format!($($arg)*))
    };
}

/// Log at a warning level, formatting only if the level is active
#[macro_export]
macro_rules! modlog_warning {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log_with($crate::logging::Severity::Warning, $level, || format!($($arg)*))
    };
}

/// Log at an error level, formatting only if the level is active
#[macro_export]
macro_rules! modlog_error {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log_with($crate::logging::Severity::Error, $level, || format!($($arg)*))
    };
}
