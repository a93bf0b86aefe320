// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Coercion of submitted form data into write payloads.
//!
//! Forms arrive as loose JSON where numbers are often strings. Only
//! editable declared fields survive; each value is converted to the shape
//! its field type expects:
//!
//! | Field type | Accepted | Written |
//! |------------|----------|---------|
//! | `String` | string | string |
//! | `Int` | integer, numeric string | integer |
//! | `Bool` | bool, `"true"` / `"false"` / `"on"` / `"off"` | bool |
//! | `Time` | RFC 3339 string | RFC 3339 string, UTC |
//! | `ForeignKey` | id, numeric string, `null` / `""` | id or `null` |
//! | `Relation` | array of ids or numeric strings | array of ids |
//!
//! Undeclared and read-only keys are dropped without error.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use vent_core::{FieldConfig, FieldType, RecordData, SchemaConfig};

use crate::error::AdminError;

/// Keep editable fields of `submitted` and coerce them to their types.
///
/// # Errors
///
/// [`AdminError::InvalidForm`] naming the first field whose value has the
/// wrong shape. The message describes the expected shape, never the value.
pub fn coerce_form(schema: &SchemaConfig, submitted: &RecordData) -> Result<RecordData, AdminError> {
    let mut data = RecordData::new();
    for field in schema.fields().iter().filter(|f| f.editable) {
        let Some(value) = submitted.get(&field.name) else {
            continue;
        };
        data.insert(field.name.clone(), coerce_value(field, value)?);
    }

    let dropped = submitted.len().saturating_sub(data.len());
    if dropped > 0 {
        tracing::debug!(schema = schema.name(), dropped, "dropped non-editable form keys");
    }
    Ok(data)
}

fn coerce_value(field: &FieldConfig, value: &Value) -> Result<Value, AdminError> {
    let invalid = |reason: &str| AdminError::InvalidForm {
        field:  field.name.clone(),
        reason: reason.to_owned()
    };

    match field.field_type {
        FieldType::String => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(invalid("expected text"))
        },
        FieldType::Int => parse_id(value)
            .map(Value::from)
            .ok_or_else(|| invalid("expected an integer")),
        FieldType::Bool => parse_bool(value)
            .map(Value::Bool)
            .ok_or_else(|| invalid("expected a boolean")),
        FieldType::Time => value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| {
                Value::String(
                    t.with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                )
            })
            .ok_or_else(|| invalid("expected an RFC 3339 timestamp")),
        FieldType::ForeignKey => match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) if s.is_empty() => Ok(Value::Null),
            _ => parse_id(value)
                .map(Value::from)
                .ok_or_else(|| invalid("expected a record id"))
        },
        FieldType::Relation => {
            let Value::Array(items) = value else {
                return Err(invalid("expected a list of record ids"));
            };
            items
                .iter()
                .map(|item| parse_id(item).map(Value::from))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array)
                .ok_or_else(|| invalid("expected a list of record ids"))
        }
    }
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "on" => Some(true),
            "false" | "off" => Some(false),
            _ => None
        },
        _ => None
    }
}
