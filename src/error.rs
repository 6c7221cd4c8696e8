//! Error types for the rename-keys node
//!
//! This module defines the errors a node reports to its host, either from
//! `init` or through the failure side of the outcome channel.

use thiserror::Error;

use crate::config::ConfigError;
use crate::node::NodeState;

/// Node error type
#[derive(Error, Debug)]
pub enum NodeError {
    /// Configuration could not be parsed into the node's shape
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A message arrived while the node was not initialized
    #[error("Node is not ready to process messages (state: {state})")]
    NotReady { state: NodeState },

    /// Reserved for transforms that can fail on a message
    #[error("Processing error: {0}")]
    Processing(String),
}

impl NodeError {
    /// Whether the error was raised during initialization
    pub fn is_configuration(&self) -> bool {
        matches!(self, NodeError::Configuration(_))
    }
}

/// Result type alias for node operations
pub type NodeResult<T> = Result<T, NodeError>;
