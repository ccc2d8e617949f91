//! Clap CLI definitions for Ariadne.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const AFTER_HELP: &str = "\
\x1b[1;36mExamples:\x1b[0m
  ariadne start                  Serve the agent endpoint
  ariadne inspect message.json   Show id, type and threading of a wire message
  ariadne ping --respond         Dispatch a trust ping in-process";

/// Ariadne — agent-to-agent messaging engine.
#[derive(Parser)]
#[command(name = "ariadne", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Boot the kernel and serve the HTTP agent endpoint.
    Start,
    /// Decode a wire message and print its envelope.
    Inspect {
        /// File holding one JSON wire message.
        file: PathBuf,
    },
    /// Dispatch a trust ping through an in-process kernel.
    Ping {
        /// Ask for a trust_ping_response.
        #[arg(long)]
        respond: bool,
        /// Comment carried by the ping.
        #[arg(long)]
        comment: Option<String>,
    },
}
