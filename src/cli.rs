//! CLI argument parsing for subcrack

use crate::solver::Method;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "subcrack")]
#[command(version)]
#[command(about = "Monoalphabetic substitution cipher solver", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output (written to stderr)
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a known substitution key to a file
    Sub {
        /// Text file to transform
        file: PathBuf,

        /// Plaintext alphabet, e.g. abcdefghijklmnopqrstuvwxyz
        alphabet: String,

        /// Cipher symbol for each alphabet position, same length as ALPHABET
        subkey: String,

        /// Encrypt with the key instead of decrypting
        #[arg(long)]
        encrypt: bool,
    },

    /// Recover the key of a ciphertext from letter statistics
    Crack {
        /// Ciphertext file
        file: PathBuf,

        /// Plaintext fragments that must all appear in the decryption
        cribs: Vec<String>,

        /// Search strategy (overrides the config file)
        #[arg(long, value_enum)]
        method: Option<Method>,

        /// Maximum number of attempts before giving up
        #[arg(long = "max-attempts", value_name = "N")]
        max_attempts: Option<usize>,

        /// Swap proposals per stochastic attempt
        #[arg(long, value_name = "N")]
        iterations: Option<usize>,

        /// Base seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Attempts to run in parallel
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// TOML configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// JSON frequency model replacing the built-in English tables
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Match cribs regardless of case
        #[arg(long)]
        ignore_case: bool,
    },
}
