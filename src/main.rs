//! rename-keys - Rule-engine rename-keys node harness
//!
//! This binary runs newline-delimited JSON messages through a rename-keys
//! node and writes one JSON outcome per processed message to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::sync::Arc;
use tracing::info;

use rename_keys_node::cli::Cli;
use rename_keys_node::{Message, OutcomeCollector, RenameKeysConfig, RenameKeysNode, RuleNode};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    rename_keys_node::init_logging(&cli.log_level.to_string())?;

    // Load configuration
    let mut config = RenameKeysConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if cli.from_metadata {
        config.from_metadata = true;
    }

    if cli.validate {
        println!("Configuration is valid");
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut node = RenameKeysNode::new();
    node.init(config.to_value())?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let collector = OutcomeCollector::new();
    let mut processed = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let msg: Message = serde_json::from_str(&line)
            .with_context(|| format!("Invalid message on line {}", idx + 1))?;
        node.on_msg(&collector, Arc::new(msg));
        processed += 1;

        for outcome in collector.drain() {
            tracing::trace!(
                msg_id = %outcome.message().id(),
                success = outcome.is_success(),
                "Writing outcome"
            );
            serde_json::to_writer(&mut out, &outcome)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    node.destroy();

    info!(processed, "Finished processing messages");

    Ok(())
}
