// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed field values.
//!
//! A [`FieldValue`] is the read-side representation of one field of a
//! record: a type tag, the raw value, a display string and, for relation
//! fields, the relation payload. The tag is derived from the raw variant, so
//! the two can never disagree.
//!
//! # Types
//!
//! | Tag | Raw | Display |
//! |-----|-----|---------|
//! | `String` | `String` | verbatim |
//! | `Int` | `i64` | decimal |
//! | `Bool` | `bool` | `true` / `false` |
//! | `Time` | `DateTime<Utc>` | RFC 3339, seconds, `Z` |
//! | `ForeignKey` | target id + [`RelationValue`] | target label |
//! | `Relation` | [`RelationData`] | `"N item"` / `"N items"` |

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{entity::EntityData, error::TypeMismatch};

/// Type tag of a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Text.
    String,

    /// Signed integer.
    Int,

    /// Boolean flag.
    Bool,

    /// UTC timestamp.
    Time,

    /// Single related record (belongs-to).
    ForeignKey,

    /// Collection of related records (has-many / many-to-many).
    Relation
}

impl FieldType {
    /// Stable lowercase name, also used as the default form input type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Time => "time",
            Self::ForeignKey => "foreign_key",
            Self::Relation => "relation"
        }
    }

    /// Check if values of this type carry a relation payload.
    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::ForeignKey | Self::Relation)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationValue {
    /// Related schema name, e.g. `"User"`.
    pub target_schema: String,
    /// Id of the related record.
    pub target_id:     i64,
    /// Display text of the related record, e.g. `"alice@example.com"`.
    pub target_label:  String,
    /// Admin path of the related schema, e.g. `"/admin/users/"`.
    pub target_path:   String
}

/// Result of loading a relation.
///
/// `loaded == false` only marks a relation key that is present but was not
/// fetched; eager loading always produces loaded data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationData {
    /// Related schema name.
    pub target_schema: String,
    /// Admin path of the related schema.
    pub target_path:   String,
    /// Related records.
    pub entities:      Vec<EntityData>,
    /// Whether `entities` reflects storage.
    pub loaded:        bool
}

impl RelationData {
    /// Relation that was fetched from storage.
    pub fn loaded(
        target_schema: impl Into<String>,
        target_path: impl Into<String>,
        entities: Vec<EntityData>
    ) -> Self {
        Self {
            target_schema: target_schema.into(),
            target_path: target_path.into(),
            entities,
            loaded: true
        }
    }

    /// Relation key present without data.
    pub fn unloaded(target_schema: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            target_schema: target_schema.into(),
            target_path:   target_path.into(),
            entities:      Vec::new(),
            loaded:        false
        }
    }

    /// Number of related records.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if there are no related records.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Pluralized count, e.g. `"1 item"`, `"3 items"`.
    pub fn display(&self) -> String {
        match self.entities.len() {
            1 => "1 item".to_owned(),
            n => format!("{n} items")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Raw {
    String(String),
    Int(i64),
    Bool(bool),
    Time(DateTime<Utc>),
    ForeignKey(i64, RelationValue),
    Relation(RelationData)
}

/// A typed, self-describing field value.
///
/// # Example
///
/// ```rust
/// use vent_core::{FieldType, FieldValue};
///
/// let v = FieldValue::int(42);
/// assert_eq!(v.field_type(), FieldType::Int);
/// assert_eq!(v.display(), "42");
/// assert_eq!(v.int_value(), Ok(42));
/// assert!(v.string_value().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    raw:     Raw,
    display: String
}

impl FieldValue {
    /// String value, displayed verbatim.
    pub fn string(v: impl Into<String>) -> Self {
        let v = v.into();
        Self {
            display: v.clone(),
            raw:     Raw::String(v)
        }
    }

    /// Integer value, displayed in decimal.
    pub fn int(v: i64) -> Self {
        Self {
            raw:     Raw::Int(v),
            display: v.to_string()
        }
    }

    /// Boolean value, displayed as `true` / `false`.
    pub fn bool(v: bool) -> Self {
        Self {
            raw:     Raw::Bool(v),
            display: v.to_string()
        }
    }

    /// Timestamp, displayed as RFC 3339 with second precision.
    pub fn time(v: DateTime<Utc>) -> Self {
        Self {
            raw:     Raw::Time(v),
            display: v.to_rfc3339_opts(SecondsFormat::Secs, true)
        }
    }

    /// Foreign key to a single record, displayed as the target label.
    pub fn foreign_key(id: i64, relation: RelationValue) -> Self {
        Self {
            display: relation.target_label.clone(),
            raw:     Raw::ForeignKey(id, relation)
        }
    }

    /// Collection of related records, displayed as a pluralized count.
    pub fn relation(data: RelationData) -> Self {
        Self {
            display: data.display(),
            raw:     Raw::Relation(data)
        }
    }

    /// Type tag.
    pub const fn field_type(&self) -> FieldType {
        match self.raw {
            Raw::String(_) => FieldType::String,
            Raw::Int(_) => FieldType::Int,
            Raw::Bool(_) => FieldType::Bool,
            Raw::Time(_) => FieldType::Time,
            Raw::ForeignKey(..) => FieldType::ForeignKey,
            Raw::Relation(_) => FieldType::Relation
        }
    }

    /// Human-readable text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Check if the raw value is its type's zero value.
    ///
    /// Zero time is the Unix epoch; a foreign key is zero when its id is 0
    /// and a relation when it has no records.
    pub fn is_zero(&self) -> bool {
        match &self.raw {
            Raw::String(v) => v.is_empty(),
            Raw::Int(v) => *v == 0,
            Raw::Bool(v) => !*v,
            Raw::Time(v) => *v == DateTime::<Utc>::default(),
            Raw::ForeignKey(id, _) => *id == 0,
            Raw::Relation(data) => data.is_empty()
        }
    }

    /// Raw string.
    pub fn string_value(&self) -> Result<&str, TypeMismatch> {
        match &self.raw {
            Raw::String(v) => Ok(v),
            _ => Err(self.mismatch(FieldType::String))
        }
    }

    /// Raw integer; foreign keys yield the target id.
    pub fn int_value(&self) -> Result<i64, TypeMismatch> {
        match &self.raw {
            Raw::Int(v) | Raw::ForeignKey(v, _) => Ok(*v),
            _ => Err(self.mismatch(FieldType::Int))
        }
    }

    /// Raw boolean.
    pub fn bool_value(&self) -> Result<bool, TypeMismatch> {
        match &self.raw {
            Raw::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(FieldType::Bool))
        }
    }

    /// Raw timestamp.
    pub fn time_value(&self) -> Result<DateTime<Utc>, TypeMismatch> {
        match &self.raw {
            Raw::Time(v) => Ok(*v),
            _ => Err(self.mismatch(FieldType::Time))
        }
    }

    /// Foreign key target.
    pub fn relation_value(&self) -> Result<&RelationValue, TypeMismatch> {
        match &self.raw {
            Raw::ForeignKey(_, relation) => Ok(relation),
            _ => Err(self.mismatch(FieldType::ForeignKey))
        }
    }

    /// Related records of a relation field.
    pub fn relation_data(&self) -> Result<&RelationData, TypeMismatch> {
        match &self.raw {
            Raw::Relation(data) => Ok(data),
            _ => Err(self.mismatch(FieldType::Relation))
        }
    }

    /// Convert into the dynamic representation used for write payloads.
    ///
    /// Foreign keys become their id, relations an array of related ids and
    /// times an RFC 3339 string keeping any sub-second part.
    pub fn to_json(&self) -> Value {
        match &self.raw {
            Raw::String(v) => Value::from(v.as_str()),
            Raw::Int(v) | Raw::ForeignKey(v, _) => Value::from(*v),
            Raw::Bool(v) => Value::Bool(*v),
            Raw::Time(v) => Value::from(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Raw::Relation(data) => data.entities.iter().map(|e| Value::from(e.id())).collect()
        }
    }

    fn mismatch(&self, expected: FieldType) -> TypeMismatch {
        TypeMismatch {
            expected,
            actual: self.field_type()
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::int(i64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::bool(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::time(v)
    }
}
