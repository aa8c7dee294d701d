//! CLI definitions using clap.
//!
//! Records are read as JSON objects; each top-level key is one field.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// infohash - fingerprint records and find the field that changed
#[derive(Parser, Debug)]
#[command(name = "infohash", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true, env = "INFOHASH_JSON")]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the fingerprint of a JSON record
    Hash {
        /// Record file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Compare a JSON record with a stored fingerprint
    Compare {
        /// Record file, or `-` for stdin
        input: PathBuf,

        /// Fingerprint hex, as printed by `infohash hash`
        fingerprint: String,

        /// Expected schema id; refuse to compare if the field list differs
        #[arg(long)]
        schema: Option<String>,

        /// Exit with an error when any field changed
        #[arg(long)]
        strict: bool,
    },

    /// Print the schema id of a JSON record's field list
    Schema {
        /// Record file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
