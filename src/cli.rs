use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::generator::DEFAULT_MAX_DEPTH;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether a grammar is simple
    Check {
        /// File containing the grammar
        file: PathBuf
    },

    /// Check sentences against a simple grammar
    Recognize {
        /// File containing the grammar
        file: PathBuf,

        /// Start symbol (default: first in the file)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<char>,

        /// Print the derivation, or why a sentence was rejected
        #[arg(long)]
        trace: bool,

        /// Sentences to check (default: one per line from stdin)
        inputs: Vec<String>
    },

    /// Generate random sentences from a grammar
    Generate {
        /// File containing the grammar
        file: PathBuf,

        /// Start symbol (default: first in the file)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<char>,

        /// Amount to generate
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Depth after which expansion steers towards terminating rules
        #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize
    },

    /// Split C-like source text into tokens
    Scan {
        /// Text to scan (default: one expression per line from stdin)
        text: Option<String>
    }
}
