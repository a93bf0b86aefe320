// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity data: one resolved record as a name → value map.
//!
//! Storage clients build an [`EntityData`] per read. Once returned it is not
//! modified in place; [`EntityData::with`] consumes the map and returns a new
//! one.
//!
//! # Relation state
//!
//! | Map contents for `name` | `has_edge` | `get_edges` |
//! |-------------------------|------------|-------------|
//! | absent | `false` | `None` |
//! | non-relation value | `false` | `None` |
//! | relation, not loaded | `false` | `None` |
//! | relation, loaded, empty | `true` | `Some(&[])` |
//! | relation, loaded | `true` | `Some(entities)` |

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::value::{FieldValue, RelationData};

/// Field holding the record id.
pub const ID_FIELD: &str = "id";

/// A single record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityData {
    fields: HashMap<String, FieldValue>
}

impl EntityData {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Record id, or 0 when the record has no integer `id`.
    pub fn id(&self) -> i64 {
        self.get_int(ID_FIELD)
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in unspecified order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// String field, or `""` when absent or not a string.
    pub fn get_string(&self, name: &str) -> &str {
        self.get(name)
            .and_then(|v| v.string_value().ok())
            .unwrap_or_default()
    }

    /// Integer or foreign key field, or 0 when absent or mistyped.
    pub fn get_int(&self, name: &str) -> i64 {
        self.get(name)
            .and_then(|v| v.int_value().ok())
            .unwrap_or_default()
    }

    /// Boolean field, or `false` when absent or mistyped.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name)
            .and_then(|v| v.bool_value().ok())
            .unwrap_or_default()
    }

    /// Timestamp field, or the Unix epoch when absent or mistyped.
    pub fn get_time(&self, name: &str) -> DateTime<Utc> {
        self.get(name)
            .and_then(|v| v.time_value().ok())
            .unwrap_or_default()
    }

    /// Related records of a loaded relation.
    ///
    /// Returns `None` when the relation was not loaded, so callers cannot
    /// mistake "not fetched" for "no records".
    pub fn get_edges(&self, name: &str) -> Option<&[EntityData]> {
        self.loaded_relation(name).map(|data| data.entities.as_slice())
    }

    /// Check if `name` is a loaded relation, possibly empty.
    pub fn has_edge(&self, name: &str) -> bool {
        self.loaded_relation(name).is_some()
    }

    /// Dynamic representation of every field.
    pub fn to_json(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    fn loaded_relation(&self, name: &str) -> Option<&RelationData> {
        self.get(name)
            .and_then(|v| v.relation_data().ok())
            .filter(|data| data.loaded)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for EntityData {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect()
        }
    }
}

impl IntoIterator for EntityData {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
