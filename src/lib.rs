//! modlog - per-handle leveled logging for frame-driven hosts
//!
//! Producers on any thread format and queue lines when their handle has the
//! requested (severity, level) enabled; the host's main thread flushes the
//! queues once per frame. Levels are toggled at runtime through chat commands.

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod facade;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod service;

pub use command::{ChatMessage, Command, CommandError, CommandInterpreter, CommandOutcome};
pub use config::Config;
pub use error::{ModLogError, Result};
pub use facade::ModLogger;
pub use lifecycle::Addon;
pub use logging::{Severity, Sink};
pub use service::ModLogService;
