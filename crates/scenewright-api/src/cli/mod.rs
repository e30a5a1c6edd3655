//! CLI command definitions and dispatch for the `swright` binary.
//!
//! Uses clap derive macros for argument parsing. Commands follow a
//! verb-first pattern (`swright setup`, `swright line finegrain
//! character1`, `swright export normal --stats`).

pub mod export;
pub mod generate;
pub mod lines;
pub mod session;
pub mod setup;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Write dialogue scenes with an LLM co-author.
#[derive(Parser)]
#[command(name = "swright", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the original session through an interactive form.
    Setup {
        /// Read the session from a JSON file instead of prompting.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show the session visible to a mode.
    Show {
        /// Mode to load (normal | finegrain).
        mode: String,
    },

    /// Generate a single dialogue line for one character.
    Line {
        /// Mode whose session copy to use (normal | finegrain).
        mode: String,
        /// Speaking slot (character1 | character2).
        speaker: String,
    },

    /// Generate a batch of exchanges advancing the current plot line.
    Scene {
        /// Mode whose session copy to use (normal | finegrain).
        mode: String,
        /// Response parsing strategy (free-text | structured).
        #[arg(long)]
        parse: Option<String>,
    },

    /// Edit a dialogue line in place.
    Edit {
        mode: String,
        /// Zero-based line index.
        index: usize,
        /// Replacement text.
        text: String,
    },

    /// Delete a dialogue line.
    #[command(name = "delete-line")]
    DeleteLine {
        mode: String,
        /// Zero-based line index.
        index: usize,
    },

    /// Export the script as a paginated text document.
    Export {
        mode: String,
        /// Append the statistics footer.
        #[arg(long)]
        stats: bool,
        /// Output file (defaults to screenplay-<date>.txt).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Discard a mode's edits and return to the original session.
    Reset {
        mode: String,
    },

    /// Clear a mode's session copy, or everything with --all.
    Clear {
        /// Mode to clear (omit with --all).
        mode: Option<String>,
        /// Clear the original and every mode copy.
        #[arg(long)]
        all: bool,
    },

    /// Run the REST API server.
    Serve {
        #[arg(long, default_value_t = 7878)]
        port: u16,
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        shell: Shell,
    },
}

/// Parse a mode argument with a setup hint on failure.
pub(crate) fn parse_mode(s: &str) -> anyhow::Result<scenewright_types::session::Mode> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!("{e} (expected 'normal' or 'finegrain')"))
}
