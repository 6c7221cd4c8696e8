//! CLI argument parsing for the rename-keys harness
//!
//! # Options
//!
//! - `--config` / `-c`: Node configuration file, YAML or JSON (env: RENAME_KEYS_CONFIG)
//! - `--input` / `-i`: Newline-delimited messages to process (default: stdin)
//! - `--from-metadata`: Rename metadata keys instead of payload fields
//! - `--validate`: Print the parsed configuration and exit
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: RENAME_KEYS_LOG_LEVEL)
//!
//! # Precedence
//!
//! `--from-metadata` overrides the configuration file, which overrides the
//! built-in defaults.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// rename-keys - Run messages through a rename-keys transform node
///
/// Reads one JSON message per line and writes one JSON outcome per line.
#[derive(Parser, Debug)]
#[command(name = "rename-keys")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to node configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "rename-keys.yaml",
        env = "RENAME_KEYS_CONFIG"
    )]
    pub config: PathBuf,

    /// Read messages from this file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Rename metadata keys instead of payload fields (overrides config file)
    #[arg(long)]
    pub from_metadata: bool,

    /// Validate configuration and print it without processing messages
    #[arg(long)]
    pub validate: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "warn",
        env = "RENAME_KEYS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warn level - default
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
