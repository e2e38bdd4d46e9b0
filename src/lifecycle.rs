//! Addon lifecycle
//!
//! The host drives the service through three hooks: start (create the single
//! instance), frame update (flush) and stop (final flush, release).

use crate::command::{ChatMessage, CommandInterpreter, CommandOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::facade::ModLogger;
use crate::logging::{CommandChannel, FlushStats, HostClock, Sink};
use crate::service::ModLogService;
use std::sync::Arc;
use tracing::debug;

/// Holds the logging service between start and stop
pub struct Addon {
    config: Config,
    service: Option<Arc<ModLogService>>,
    interpreter: Option<CommandInterpreter>,
}

impl Addon {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            service: None,
            interpreter: None,
        }
    }

    /// Create the service if it does not exist yet. Main thread only.
    ///
    /// A second call keeps the running instance, so the epoch is captured once.
    pub fn on_service_start(&mut self, host: &dyn HostClock) -> Result<Arc<ModLogService>> {
        if let Some(service) = &self.service {
            debug!("service already started");
            return Ok(service.clone());
        }
        let service = ModLogService::start(&self.config, host)?;
        self.interpreter = Some(CommandInterpreter::new(service.clone()));
        self.service = Some(service.clone());
        Ok(service)
    }

    /// Flush queued lines. Call at least once per host update tick.
    pub fn on_frame_update(&self, sink: &mut dyn Sink) -> FlushStats {
        match &self.service {
            Some(service) => service.flush(sink),
            None => FlushStats::default(),
        }
    }

    /// Forward a chat message to the command interpreter
    pub fn on_chat_message(
        &self,
        message: &ChatMessage<'_>,
        channel: &mut dyn CommandChannel,
    ) -> CommandOutcome {
        match &self.interpreter {
            Some(interpreter) => interpreter.handle(message, channel),
            None => CommandOutcome::Ignored,
        }
    }

    /// Flush what is left and release the instance
    ///
    /// `ModLogger`s still holding the service keep it alive, but nothing
    /// flushes it anymore.
    pub fn on_service_stop(&mut self, sink: &mut dyn Sink) -> FlushStats {
        self.interpreter = None;
        match self.service.take() {
            Some(service) => {
                let stats = service.flush(sink);
                debug!(flushed = stats.total(), "logging service stopped");
                stats
            }
            None => FlushStats::default(),
        }
    }

    pub fn service(&self) -> Option<&Arc<ModLogService>> {
        self.service.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.service.is_some()
    }

    /// Logger bound to `name`, if the service is running
    pub fn logger(&self, name: &str) -> Option<ModLogger> {
        self.service
            .as_ref()
            .map(|service| ModLogger::new(service.clone(), name))
    }
}
