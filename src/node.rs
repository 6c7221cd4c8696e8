//! Rename-keys transform node
//!
//! This module provides the node lifecycle (`init` / `on_msg` / `destroy`)
//! and the per-message dispatch between payload and metadata renaming.

use serde_json::Value;
use std::sync::Arc;

use crate::config::RenameKeysConfig;
use crate::context::NodeContext;
use crate::error::{NodeError, NodeResult};
use crate::message::Message;
use crate::rename::{rename_metadata, rename_payload};

/// Lifecycle contract between a rule node and the pipeline hosting it
///
/// `init` and `destroy` take `&mut self`, so they cannot overlap with an
/// in-flight `on_msg`; `on_msg` only needs `&self` and may run concurrently.
pub trait RuleNode: Send + Sync {
    /// Parse `configuration` and make the node ready
    fn init(&mut self, configuration: Value) -> NodeResult<()>;

    /// Process one message, reporting exactly one outcome through `ctx`
    fn on_msg(&self, ctx: &dyn NodeContext, msg: Arc<Message>);

    /// Release the configuration; calling it again is a no-op
    fn destroy(&mut self);
}

/// Observable lifecycle state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Uninitialized,
    Ready,
    Destroyed,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Uninitialized => "uninitialized",
            NodeState::Ready => "ready",
            NodeState::Destroyed => "destroyed",
        }
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Ready(RenameKeysConfig),
    Destroyed,
}

/// Node that renames payload fields or metadata keys
///
/// In payload mode a payload that is not a JSON object is passed through as
/// the very same message. Metadata mode always emits a new message sharing
/// the original payload.
#[derive(Debug)]
pub struct RenameKeysNode {
    lifecycle: Lifecycle,
}

impl Default for RenameKeysNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RenameKeysNode {
    /// Create an uninitialized node
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Create a node that is ready with an already typed configuration
    pub fn with_config(config: RenameKeysConfig) -> Self {
        log_ready(&config);
        Self {
            lifecycle: Lifecycle::Ready(config),
        }
    }

    pub fn state(&self) -> NodeState {
        match self.lifecycle {
            Lifecycle::Uninitialized => NodeState::Uninitialized,
            Lifecycle::Ready(_) => NodeState::Ready,
            Lifecycle::Destroyed => NodeState::Destroyed,
        }
    }

    /// Active configuration, if the node is ready
    pub fn config(&self) -> Option<&RenameKeysConfig> {
        match &self.lifecycle {
            Lifecycle::Ready(config) => Some(config),
            _ => None,
        }
    }

    /// Transform a single message
    ///
    /// Returns either `msg` itself (payload pass-through) or a new message.
    ///
    /// # Errors
    /// Returns `NodeError::NotReady` unless the node has been initialized
    pub fn process(&self, msg: &Arc<Message>) -> NodeResult<Arc<Message>> {
        let config = self.config().ok_or_else(|| NodeError::NotReady {
            state: self.state(),
        })?;
        let mapping = &config.rename_keys_mapping;

        if config.from_metadata {
            let renamed = rename_metadata(msg.metadata(), mapping);
            tracing::debug!(
                msg_id = %msg.id(),
                renamed = renamed.renamed,
                "Renamed metadata keys"
            );
            return Ok(Arc::new(msg.transform_metadata(renamed.value)));
        }

        match rename_payload(msg.payload(), mapping) {
            Some(renamed) => {
                tracing::debug!(
                    msg_id = %msg.id(),
                    renamed = renamed.renamed,
                    "Renamed payload fields"
                );
                Ok(Arc::new(msg.transform_payload(renamed.value)))
            }
            None => {
                tracing::debug!(
                    msg_id = %msg.id(),
                    "Payload is not a JSON object, passing message through"
                );
                Ok(Arc::clone(msg))
            }
        }
    }
}

fn log_ready(config: &RenameKeysConfig) {
    tracing::info!(
        mappings = config.rename_keys_mapping.len(),
        from_metadata = config.from_metadata,
        "Rename keys node initialized"
    );
}

impl RuleNode for RenameKeysNode {
    fn init(&mut self, configuration: Value) -> NodeResult<()> {
        match RenameKeysConfig::from_value(configuration) {
            Ok(config) => {
                log_ready(&config);
                self.lifecycle = Lifecycle::Ready(config);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Rename keys node configuration rejected");
                self.lifecycle = Lifecycle::Uninitialized;
                Err(e.into())
            }
        }
    }

    fn on_msg(&self, ctx: &dyn NodeContext, msg: Arc<Message>) {
        match self.process(&msg) {
            Ok(out) => ctx.tell_success(out),
            Err(e) => {
                tracing::warn!(msg_id = %msg.id(), error = %e, "Failed to process message");
                ctx.tell_failure(msg, e);
            }
        }
    }

    fn destroy(&mut self) {
        if !matches!(self.lifecycle, Lifecycle::Destroyed) {
            tracing::debug!("Rename keys node destroyed");
        }
        self.lifecycle = Lifecycle::Destroyed;
    }
}
