//! Outcome channel between a node and its host
//!
//! The host hands a [`NodeContext`] to every `on_msg` call. A node reports
//! exactly one outcome per message through it.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use crate::error::NodeError;
use crate::message::Message;

/// Host capability a node reports outcomes through
pub trait NodeContext: Send + Sync {
    /// Forward `msg` downstream
    fn tell_success(&self, msg: Arc<Message>);

    /// Report that `msg` could not be processed
    fn tell_failure(&self, msg: Arc<Message>, error: NodeError);
}

/// A single reported outcome
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        message: Arc<Message>,
    },
    Failure {
        message: Arc<Message>,
        error: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &Arc<Message> {
        match self {
            Outcome::Success { message } | Outcome::Failure { message, .. } => message,
        }
    }
}

/// Context that records outcomes in the order they are reported
#[derive(Debug, Default)]
pub struct OutcomeCollector {
    outcomes: Mutex<Vec<Outcome>>,
}

impl OutcomeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.lock().is_empty()
    }

    /// Take every outcome recorded so far
    pub fn drain(&self) -> Vec<Outcome> {
        std::mem::take(&mut *self.outcomes.lock())
    }
}

impl NodeContext for OutcomeCollector {
    fn tell_success(&self, msg: Arc<Message>) {
        self.outcomes.lock().push(Outcome::Success { message: msg });
    }

    fn tell_failure(&self, msg: Arc<Message>, error: NodeError) {
        self.outcomes.lock().push(Outcome::Failure {
            message: msg,
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EntityId, Metadata};
    use uuid::Uuid;

    fn msg() -> Arc<Message> {
        Arc::new(Message::new(
            "T",
            EntityId::device(Uuid::new_v4()),
            Metadata::new(),
            "{}",
        ))
    }

    #[test]
    fn test_collector_records_in_order() {
        let collector = OutcomeCollector::new();
        assert!(collector.is_empty());

        collector.tell_success(msg());
        collector.tell_failure(msg(), NodeError::Processing("boom".to_string()));
        assert_eq!(collector.len(), 2);

        let outcomes = collector.drain();
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[0].message().msg_type(), "T");
        assert_eq!(outcomes[1].message().payload(), "{}");
        assert!(!outcomes[1].is_success());
        assert!(collector.is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let message = msg();
        let success = serde_json::to_value(Outcome::Success {
            message: Arc::clone(&message),
        })
        .unwrap();
        assert_eq!(success["outcome"], "success");
        assert_eq!(success["message"]["payload"], "{}");

        let failure = serde_json::to_value(Outcome::Failure {
            message,
            error: "bad".to_string(),
        })
        .unwrap();
        assert_eq!(failure["outcome"], "failure");
        assert_eq!(failure["error"], "bad");
    }
}
