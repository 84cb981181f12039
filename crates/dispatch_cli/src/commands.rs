//! One line of interactive input parsed into a command.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dispatch", no_binary_name = true, disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ReplCommand {
    /// Register a cab at a node
    AddCab {
        id: u32,
        location: u32,
        /// Driver name, may span several words
        #[arg(required = true, num_args = 1..)]
        driver: Vec<String>,
    },
    /// List every cab
    Cabs,
    /// Book a ride from a pickup node
    Book { pickup: u32 },
    /// List rides in progress
    Active,
    /// End a ride at a drop node
    End { ride: u64, drop: u32 },
    /// List completed rides
    Completed,
    /// Cancel a ride in progress
    Cancel { ride: u64 },
    /// List queued pickups
    Queue,
    /// Clear rides and the queue, every cab back to available
    Reset,
    /// Leave the session
    #[command(alias = "quit")]
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`; `help` and bad input come back as
/// a [`clap::Error`] whose rendering is meant for the user.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, clap::Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    ReplLine::try_parse_from(tokens).map(|parsed| Some(parsed.command))
}
