use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "turfgdd",
    version,
    about = "Growing degree day tracker with turf growth and mowing advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update on a schedule; reads commands from stdin (default)
    Run,
    /// Run a single update cycle and print the result
    Tick {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored state and recommendations
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Zero all accumulated GDD and growth
    Reset,
    /// Overwrite the seasonal GDD total
    SetSeasonal {
        value: f64,
    },
    /// Change the base temperature (°C); kept across restarts
    SetBase {
        value: f64,
    },
    /// Record that the lawn was just mowed
    RecordMowing,
    /// Re-run interactive setup
    Init,
    /// Validate config and test the Home Assistant connection
    Check,
}

/// A manual command typed into `run`'s stdin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopCommand {
    Reset,
    Mow,
    SetSeasonal(f64),
    SetBase(f64),
    Tick,
    Status,
    Help,
}

impl LoopCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err("empty command".into());
        };
        let arg = parts.next();

        let number = |name: &str| -> std::result::Result<f64, String> {
            arg.ok_or_else(|| format!("usage: {} <value>", name))?
                .parse::<f64>()
                .map_err(|e| format!("invalid value for {}: {}", name, e))
        };

        match word.to_lowercase().as_str() {
            "reset" => Ok(LoopCommand::Reset),
            "mow" | "mowed" => Ok(LoopCommand::Mow),
            "seasonal" => Ok(LoopCommand::SetSeasonal(number("seasonal")?)),
            "base" => Ok(LoopCommand::SetBase(number("base")?)),
            "tick" | "update" => Ok(LoopCommand::Tick),
            "status" => Ok(LoopCommand::Status),
            "help" | "?" => Ok(LoopCommand::Help),
            other => Err(format!("unknown command '{}' (try 'help')", other)),
        }
    }
}

pub const LOOP_HELP: &str = "commands: reset | mow | seasonal <gdd> | base <°C> | tick | status | help";
