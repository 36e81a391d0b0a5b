pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::stages::Stage;

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Combine, clean and redistribute IPTV channel lists", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/confluence/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Stage to run; runs the whole pipeline when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run every stage in order
    Run,
    /// Seed the own-source list
    Capture,
    /// Fetch subscriptions and merge them with local lists
    Combine,
    /// Filter the merged list through the blacklist
    Clean,
    /// Split the cleaned list into per-channel files
    Split,
    /// Filter per-channel files through the whitelist
    Pick,
    /// Substitute picked sources into the user template
    Result,
}

impl Commands {
    /// Stages this command runs, in order.
    pub fn stages(self) -> Vec<Stage> {
        match self {
            Commands::Run => Stage::ALL.to_vec(),
            Commands::Capture => vec![Stage::Capture],
            Commands::Combine => vec![Stage::Combine],
            Commands::Clean => vec![Stage::Clean],
            Commands::Split => vec![Stage::Split],
            Commands::Pick => vec![Stage::Pick],
            Commands::Result => vec![Stage::Result],
        }
    }
}
