//! Key renaming over JSON objects and message metadata
//!
//! Both shapes follow the same rule: walk the entries in input order, re-key
//! every entry whose key appears in the mapping and copy the rest. When two
//! entries land on the same key the later one wins, keeping the position of
//! the first.

use indexmap::IndexMap;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::message::Metadata;

/// Old key -> new key
pub type RenameMapping = HashMap<String, String>;

/// Result of a rename pass
#[derive(Debug, Clone, PartialEq)]
pub struct Renamed<T> {
    /// The rebuilt container
    pub value: T,
    /// Number of entries whose key was found in the mapping
    pub renamed: usize,
}

/// Feed every entry to `put` under its target key, returning the hit count
fn rekey<K, V>(
    entries: impl IntoIterator<Item = (K, V)>,
    mapping: &RenameMapping,
    mut put: impl FnMut(String, V),
) -> usize
where
    K: AsRef<str> + Into<String>,
{
    let mut renamed = 0;

    for (key, entry) in entries {
        match mapping.get(key.as_ref()) {
            Some(new_key) => {
                renamed += 1;
                put(new_key.clone(), entry);
            }
            None => put(key.into(), entry),
        }
    }

    renamed
}

/// Rebuild a JSON object with its fields re-keyed
pub fn rename_fields(
    object: &Map<String, Value>,
    mapping: &RenameMapping,
) -> Renamed<Map<String, Value>> {
    let mut value = Map::with_capacity(object.len());
    let renamed = rekey(object, mapping, |key, field| {
        value.insert(key, field.clone());
    });

    Renamed { value, renamed }
}

/// Rebuild metadata with its entries re-keyed
pub fn rename_metadata(metadata: &Metadata, mapping: &RenameMapping) -> Renamed<Metadata> {
    let mut value = Metadata::with_capacity(metadata.len());
    let renamed = rekey(metadata.iter(), mapping, |key, entry| {
        value.insert(key, entry);
    });

    Renamed { value, renamed }
}

/// Rename the top-level fields of a JSON payload
///
/// Field values are carried as raw JSON text, so numbers of any size or
/// precision and escaped strings come out exactly as they went in.
///
/// Returns `None` when the payload is not valid JSON or its root is not an
/// object; the caller passes such messages through untouched.
pub fn rename_payload(payload: &str, mapping: &RenameMapping) -> Option<Renamed<String>> {
    let object: IndexMap<String, Box<RawValue>> = match serde_json::from_str(payload) {
        Ok(object) => object,
        Err(e) => {
            tracing::trace!(error = %e, "Payload is not a JSON object");
            return None;
        }
    };

    let mut value = IndexMap::with_capacity(object.len());
    let renamed = rekey(object, mapping, |key, field| {
        value.insert(key, field);
    });

    match serde_json::to_string(&value) {
        Ok(value) => Some(Renamed { value, renamed }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize renamed payload");
            None
        }
    }
}
