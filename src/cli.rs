use clap::Parser;
use std::path::PathBuf;

/// CLI for the holdem-table binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "holdem-table", version, about = "Texas hold'em table with robot seats")]
pub struct Cli {
    /// Path to config file
    #[arg(long, default_value = "holdem-table.toml")]
    pub config: PathBuf,

    /// Number of hands to play (overrides config)
    #[arg(long)]
    pub hands: Option<u32>,

    /// Number of robot seats (overrides config)
    #[arg(long)]
    pub bots: Option<usize>,

    /// Deck seed for a reproducible session (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show all hole cards and stack changes (overrides config)
    #[arg(long)]
    pub broadcast: Option<bool>,

    /// Append a JSONL hand history to this file
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,
}
