//! Leveled logging core
//!
//! - `LevelGate` - per-handle level masks
//! - `DeferredQueues` - producer queues drained on the main thread
//! - `Clock` - epoch-relative elapsed time
//! - `Sink` / `CommandChannel` - host output capabilities

pub mod clock;
pub mod entry;
pub mod gate;
pub mod queue;
pub mod sink;

pub use clock::{Clock, HostClock, ProcessClock};
pub use entry::{format_line, Severity};
pub use gate::{Bands, LevelGate};
pub use queue::{DeferredQueues, FlushStats};
pub use sink::{CommandChannel, ConsoleChannel, ConsoleSink, MemorySink, RecordingChannel, Sink};

/// Initialize internal tracing for modlog's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
