//! Message envelope passed between rule nodes
//!
//! A [`Message`] is immutable once built. Transforms produce new messages that
//! share the untouched parts of the original through reference counting, so
//! passing a message through a node that only rewrites metadata never copies
//! the payload text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Reference to the entity a message concerns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    /// Entity kind, e.g. `DEVICE` or `ASSET`
    pub entity_type: String,
    /// Entity identifier
    pub id: Uuid,
}

impl EntityId {
    pub fn new(entity_type: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity_type: entity_type.into(),
            id,
        }
    }

    /// Shorthand for a device originator
    pub fn device(id: Uuid) -> Self {
        Self::new("DEVICE", id)
    }
}

/// Ordered string-to-string side-channel attributes of a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert an entry, replacing the value of an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Rule-engine message
///
/// Wire form:
///
/// ```json
/// {
///   "id": "6f1c...",
///   "type": "POST_TELEMETRY_REQUEST",
///   "originator": {"entityType": "DEVICE", "id": "0b7e..."},
///   "metadata": {"deviceName": "sensor-1"},
///   "payload": "{\"temp\":21.5}"
/// }
/// ```
///
/// `id` is generated when absent; `metadata` defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(rename = "type")]
    msg_type: String,
    originator: EntityId,
    #[serde(default)]
    metadata: Arc<Metadata>,
    payload: Arc<str>,
}

impl Message {
    /// Create a message with a fresh id
    pub fn new(
        msg_type: impl Into<String>,
        originator: EntityId,
        metadata: Metadata,
        payload: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg_type: msg_type.into(),
            originator,
            metadata: Arc::new(metadata),
            payload: payload.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn msg_type(&self) -> &str {
        &self.msg_type
    }

    pub fn originator(&self) -> &EntityId {
        &self.originator
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Copy of this message carrying a new payload; metadata is shared
    pub fn transform_payload(&self, payload: impl Into<Arc<str>>) -> Self {
        Self {
            id: self.id,
            msg_type: self.msg_type.clone(),
            originator: self.originator.clone(),
            metadata: Arc::clone(&self.metadata),
            payload: payload.into(),
        }
    }

    /// Copy of this message carrying new metadata; the payload is shared
    pub fn transform_metadata(&self, metadata: Metadata) -> Self {
        Self {
            id: self.id,
            msg_type: self.msg_type.clone(),
            originator: self.originator.clone(),
            metadata: Arc::new(metadata),
            payload: Arc::clone(&self.payload),
        }
    }

    /// Whether both messages point at the same payload allocation
    pub fn shares_payload_with(&self, other: &Message) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }

    /// Whether both messages point at the same metadata allocation
    pub fn shares_metadata_with(&self, other: &Message) -> bool {
        Arc::ptr_eq(&self.metadata, &other.metadata)
    }
}
