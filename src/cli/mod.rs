pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A concurrent terminal news aggregator", long_about = None)]
pub struct Cli {
    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Run one fetch cycle and print the render stream to stdout
    Fetch {
        /// Target language code (overrides the configured default)
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// List configured feed sources
    Sources,
    /// List supported language codes
    Languages,
}
