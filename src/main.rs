mod config;
mod engine;
mod geometry;
mod manager;
mod model;
mod rules;
mod search;

use crate::manager::{Manager, RunOptions};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the simulation headlessly and print the final census.
    Run {
        #[arg(long, default_value_t = 1000)]
        frames: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 100)]
        report_every: usize,

        /// Press the pause key at this frame (repeatable).
        #[arg(long)]
        toggle_pause_at: Vec<usize>,
    },

    /// Validate the configuration.
    Check,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.config).context("failed to construct mgr")?;

    match args.command {
        Command::Run {
            frames,
            seed,
            report_every,
            toggle_pause_at,
        } => {
            let opts = RunOptions {
                n_frames: frames,
                seed,
                report_every,
                toggle_pause_at,
            };
            let census = mgr.run_simulation(&opts)?;
            println!("{census}");
        }
        Command::Check => {
            mgr.check_config()?;
        }
    }

    Ok(())
}
