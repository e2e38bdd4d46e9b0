//! modlog-host - run the logging service inside a simulated frame loop
//!
//! Usage:
//!   modlog-host                        Read chat lines from stdin
//!   modlog-host --producers 2          Add background threads that log
//!   modlog-host --config modlog.toml   Load settings from a TOML file

mod cli;

use clap::Parser;
use modlog::constants::CHANNEL_CAPACITY;
use modlog::logging::{self, ConsoleChannel, ConsoleSink};
use modlog::{config, host, Config, ModLogError, Result};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.report());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let mut config = config::load(&cli.config);
    cli.apply(&mut config);
    config.validate()?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| ModLogError::Runtime { source: e })?;
    rt.block_on(run_console(config))
}

async fn run_console(config: Config) -> Result<()> {
    // Setup shutdown handler
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).map_err(|e| ModLogError::Io {
            context: "install SIGTERM handler",
            source: e,
        })?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(|e| ModLogError::Io {
            context: "install SIGINT handler",
            source: e,
        })?;
        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
            shutdown_clone.store(true, Ordering::SeqCst);
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown_clone.store(true, Ordering::SeqCst);
        });
    }

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    host::spawn_stdin_reader(tx)?;

    info!(
        prefix = %config.service.command_prefix,
        frame_ms = config.host.frame_interval_ms,
        producers = config.host.demo_producers,
        "host started, type /{} for commands",
        config.service.command_prefix
    );

    let mut sink = ConsoleSink;
    let mut channel = ConsoleChannel;
    host::run(config, rx, shutdown, &mut sink, &mut channel).await?;
    Ok(())
}
