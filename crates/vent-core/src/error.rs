// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for the core engine.
//!
//! # Overview
//!
//! | Error | Raised by | Class |
//! |-------|-----------|-------|
//! | [`TypeMismatch`] | typed [`FieldValue`](crate::FieldValue) accessors | caller bug |
//! | [`MapperError`] | [`FieldMapper`](crate::FieldMapper) stages | rejected write |
//! | [`Denied`] | [`Authorizer`](crate::Authorizer) | forbidden (403) |
//! | [`AuthError`] | credential and token services | unauthenticated (401) |
//! | [`SchemaError`] | [`SchemaConfigBuilder`](crate::SchemaConfigBuilder) | startup misconfiguration |
//!
//! Storage collaborators report failures as an opaque [`ClientError`] that
//! is propagated unchanged.

use serde_json::Value;
use thiserror::Error;

use crate::value::FieldType;

/// Boxed error used at collaborator boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque error returned by a [`SchemaClient`](crate::SchemaClient).
pub type ClientError = BoxError;

/// A typed accessor was used against a value of a different type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot read {expected} value from field of type {actual}")]
pub struct TypeMismatch {
    /// Type the caller asked for.
    pub expected: FieldType,
    /// Type actually stored in the field.
    pub actual:   FieldType
}

/// A field mapper stage rejected the submitted data.
///
/// The message names the stage, never the submitted value.
#[derive(Debug, Error)]
#[error("field mapper {stage}: {source}")]
pub struct MapperError {
    stage:  String,
    source: BoxError
}

impl MapperError {
    /// Create an error for the given stage.
    pub fn new(stage: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            stage:  stage.into(),
            source: source.into()
        }
    }

    /// Error for a stage that received a value of the wrong JSON type.
    pub fn unexpected_type(stage: impl Into<String>, expected: &str, got: &Value) -> Self {
        Self::new(
            stage,
            format!("expected {expected}, got {}", json_type_name(got))
        )
    }

    /// Stage that failed, e.g. `"password" -> "password_hash"`.
    pub fn stage(&self) -> &str {
        &self.stage
    }
}

/// Authorization denied: the principal lacks a required permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing permission `{missing}`")]
pub struct Denied {
    missing: String
}

impl Denied {
    pub(crate) fn new(missing: impl Into<String>) -> Self {
        Self {
            missing: missing.into()
        }
    }

    /// First required permission that was not granted.
    pub fn missing(&self) -> &str {
        &self.missing
    }
}

/// Failure reported by credential or token services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Password does not match the stored hash.
    #[error("password does not match")]
    PasswordMismatch,

    /// Token could not be decoded or verified.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token signature is valid but the token has expired.
    #[error("token expired")]
    Expired,

    /// Claims do not identify a principal.
    #[error("invalid claims: {0}")]
    InvalidClaims(String),

    /// Hashing or signing backend failed.
    #[error("auth backend failure: {0}")]
    Backend(String)
}

/// Invalid schema declaration detected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema name is empty.
    #[error("schema name must not be empty")]
    EmptyName,

    /// Two fields share a name.
    #[error("schema `{schema}` declares field `{field}` twice")]
    DuplicateField {
        /// Schema name.
        schema: String,
        /// Field name.
        field:  String
    },

    /// A column, field set entry or display field names an undeclared field.
    #[error("schema `{schema}` references unknown field `{field}`")]
    UnknownField {
        /// Schema name.
        schema: String,
        /// Field name.
        field:  String
    },

    /// A relation-typed field has no relation definition.
    #[error("field `{field}` of schema `{schema}` is a relation without a target")]
    MissingRelation {
        /// Schema name.
        schema: String,
        /// Field name.
        field:  String
    }
}

/// Name of a JSON value's type, used in messages instead of the value.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}
