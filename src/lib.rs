//! rename-keys-node library
//!
//! This crate provides a rule-engine transform node that renames a configured
//! set of keys, either among the top-level fields of a message's JSON payload
//! or among the entries of its metadata, and forwards the result downstream.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod node;
pub mod rename;

pub use config::{ConfigError, RenameKeysConfig};
pub use context::{NodeContext, Outcome, OutcomeCollector};
pub use error::{NodeError, NodeResult};
pub use message::{EntityId, Message, Metadata};
pub use node::{NodeState, RenameKeysNode, RuleNode};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging subsystem
///
/// Logs go to stderr so that stdout stays reserved for emitted messages.
///
/// # Arguments
/// * `level` - Log level string (trace, debug, info, warn, error)
///
/// # Errors
/// Returns an error if the logging system fails to initialize
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
