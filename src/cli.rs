//! Command-line interface definition using clap

use clap::Parser;
use modlog::Config;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Standalone host for the modlog service: reads chat lines from stdin
#[derive(Parser, Debug, Default)]
#[command(name = "modlog-host")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH", default_value = "modlog.toml")]
    pub config: PathBuf,

    /// Frame interval in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    pub frame_ms: Option<u64>,

    /// Command prefix without the leading slash (overrides config)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Number of background demo producers (overrides config)
    #[arg(long, value_name = "N")]
    pub producers: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.frame_ms {
            config.host.frame_interval_ms = ms;
        }
        if let Some(prefix) = &self.prefix {
            config.service.command_prefix = prefix.trim_start_matches('/').to_string();
        }
        if let Some(n) = self.producers {
            config.host.demo_producers = n;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
