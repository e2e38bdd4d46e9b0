//! Standalone host loop
//!
//! Stands in for a game engine: ticks frames at a fixed interval, feeds chat
//! lines to the addon, flushes on every frame, and optionally runs background
//! threads that log through `ModLogger`s.

use crate::command::ChatMessage;
use crate::config::Config;
use crate::error::{ModLogError, Result};
use crate::facade::ModLogger;
use crate::lifecycle::Addon;
use crate::logging::{CommandChannel, FlushStats, ProcessClock, Sink};
use crate::modlog_info;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Run the host loop until `shutdown` is set or the chat channel closes.
///
/// `sink` and `channel` are only touched from this task, which plays the
/// host's main thread. Returns everything flushed over the run.
pub async fn run(
    config: Config,
    mut chat: mpsc::Receiver<String>,
    shutdown: Arc<AtomicBool>,
    sink: &mut dyn Sink,
    channel: &mut dyn CommandChannel,
) -> Result<FlushStats> {
    let host_clock = ProcessClock::new();
    let mut addon = Addon::new(config.clone());
    addon.on_service_start(&host_clock)?;

    let producers_stop = Arc::new(AtomicBool::new(false));
    let producers = spawn_demo_producers(&addon, &config, producers_stop.clone())?;

    let mut frames = tokio::time::interval(Duration::from_millis(config.host.frame_interval_ms));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut totals = FlushStats::default();
    let mut frame: u64 = 0;
    loop {
        frames.tick().await;
        frame += 1;

        let mut chat_closed = false;
        loop {
            match chat.try_recv() {
                Ok(line) => {
                    let message = ChatMessage {
                        text: &line,
                        from_local_player: true,
                        is_command: line.trim_start().starts_with('/'),
                    };
                    addon.on_chat_message(&message, channel);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    chat_closed = true;
                    break;
                }
            }
        }

        totals += addon.on_frame_update(sink);

        if chat_closed || shutdown.load(Ordering::Relaxed) {
            debug!(frame, chat_closed, "host loop stopping");
            break;
        }
    }

    stop_producers(&producers_stop, producers);
    totals += addon.on_service_stop(sink);

    info!(
        frames = frame,
        errors = totals.errors,
        warnings = totals.warnings,
        infos = totals.infos,
        "host loop finished"
    );
    Ok(totals)
}

/// Background threads logging through their own `ModLogger`
fn spawn_demo_producers(
    addon: &Addon,
    config: &Config,
    stop: Arc<AtomicBool>,
) -> Result<Vec<JoinHandle<()>>> {
    let interval = Duration::from_millis(config.host.demo_interval_ms.max(1));
    let mut handles = Vec::with_capacity(config.host.demo_producers);

    for index in 0..config.host.demo_producers {
        let Some(logger) = addon.logger(&format!("Producer{}", index)) else {
            break;
        };
        let thread_stop = stop.clone();
        let spawned = thread::Builder::new()
            .name(format!("modlog-producer-{}", index))
            .spawn(move || run_producer(logger, interval, thread_stop));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                stop_producers(&stop, handles);
                return Err(ModLogError::Io {
                    context: "spawn producer thread",
                    source: e,
                });
            }
        }
    }
    Ok(handles)
}

/// Signal producers to stop and wait for them
fn stop_producers(stop: &AtomicBool, producers: Vec<JoinHandle<()>>) {
    stop.store(true, Ordering::Relaxed);
    for producer in producers {
        let name = producer.thread().name().unwrap_or("producer").to_string();
        if producer.join().is_err() {
            warn!(thread = %name, "producer thread panicked");
        }
    }
}

fn run_producer(logger: ModLogger, interval: Duration, stop: Arc<AtomicBool>) {
    let mut tick: u64 = 0;
    while !stop.load(Ordering::Relaxed) {
        let level = (tick % 3) as i32;
        modlog_info!(logger, level, "tick {} from {}", tick, logger.handle());
        if tick % 10 == 9 {
            logger.warning_at(0, "ten ticks elapsed");
        }
        tick += 1;
        thread::sleep(interval);
    }
}

/// Read stdin lines on a dedicated thread and forward them as chat input.
///
/// The channel closes when stdin reaches end of file.
pub fn spawn_stdin_reader(tx: mpsc::Sender<String>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("modlog-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|e| ModLogError::Io {
            context: "spawn stdin reader",
            source: e,
        })
}
