// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field mappers: transforms applied to submitted data before a write.
//!
//! Mappers operate on [`RecordData`], the loose JSON map that carries form
//! submissions and storage write payloads. They run strictly in order and
//! the first failure aborts the pipeline.
//!
//! # Primitives
//!
//! | Mapper | Effect | Missing input |
//! |--------|--------|---------------|
//! | [`map_field`] | rename + transform | no-op |
//! | [`transform_field`] | transform in place | no-op |
//! | [`rename_field`] | rename | no-op |
//! | [`set_default`] | insert value | inserts |
//! | [`remove_fields`] | delete keys | no-op |
//! | [`compute_field`] | many inputs → one output | no-op unless all present |
//! | [`hash_password`] | plaintext → hash | no-op; empty input is dropped |
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Map, json};
//! use vent_core::mapper::{chain_field_mappers, rename_field, set_default};
//!
//! let pipeline = chain_field_mappers([
//!     rename_field("mail", "email"),
//!     set_default("is_active", json!(true))
//! ]);
//!
//! let mut data = Map::new();
//! data.insert("mail".into(), json!("a@b.c"));
//! pipeline.apply(&mut data).unwrap();
//!
//! assert_eq!(data["email"], json!("a@b.c"));
//! assert_eq!(data["is_active"], json!(true));
//! ```

use std::{fmt, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    auth::CredentialGenerator,
    error::{BoxError, MapperError}
};

/// Loose inbound record data.
pub type RecordData = Map<String, Value>;

type MapperFn = dyn Fn(&mut RecordData) -> Result<(), MapperError> + Send + Sync;

/// A transform stage over [`RecordData`].
#[derive(Clone)]
pub struct FieldMapper {
    inner: Arc<MapperFn>
}

impl FieldMapper {
    /// Wrap a closure as a mapper.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut RecordData) -> Result<(), MapperError> + Send + Sync + 'static
    {
        Self {
            inner: Arc::new(f)
        }
    }

    /// Run the mapper on `data`.
    pub fn apply(&self, data: &mut RecordData) -> Result<(), MapperError> {
        (self.inner)(data)
    }
}

impl fmt::Debug for FieldMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapper").finish_non_exhaustive()
    }
}

/// Compose mappers into one.
///
/// Mappers run left to right on a working copy; the first error aborts the
/// chain and leaves `data` untouched. On success the copy replaces `data`.
pub fn chain_field_mappers<I>(mappers: I) -> FieldMapper
where
    I: IntoIterator<Item = FieldMapper>
{
    let mappers: Vec<FieldMapper> = mappers.into_iter().collect();
    FieldMapper::new(move |data| {
        let mut working = data.clone();
        for (index, mapper) in mappers.iter().enumerate() {
            if let Err(err) = mapper.apply(&mut working) {
                tracing::debug!(stage = err.stage(), index, "field mapper chain aborted");
                return Err(err);
            }
        }
        *data = working;
        Ok(())
    })
}

/// Move `from` to `to` through `transform`.
///
/// `from` is removed when it differs from `to`. No-op when `from` is absent.
pub fn map_field<F, E>(from: impl Into<String>, to: impl Into<String>, transform: F) -> FieldMapper
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>
{
    let from = from.into();
    let to = to.into();
    FieldMapper::new(move |data| {
        let Some(value) = data.get(&from).cloned() else {
            return Ok(());
        };
        let result = transform(value).map_err(|e| MapperError::new(stage(&from, &to), e))?;
        if from != to {
            data.remove(&from);
        }
        data.insert(to.clone(), result);
        Ok(())
    })
}

/// Transform a field in place. No-op when absent.
pub fn transform_field<F, E>(field: impl Into<String>, transform: F) -> FieldMapper
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>
{
    let field = field.into();
    map_field(field.clone(), field, transform)
}

/// Move a value to another key unchanged. No-op when absent.
pub fn rename_field(from: impl Into<String>, to: impl Into<String>) -> FieldMapper {
    map_field(from, to, Ok::<Value, BoxError>)
}

/// Insert `value` only if `field` is absent.
pub fn set_default(field: impl Into<String>, value: Value) -> FieldMapper {
    let field = field.into();
    FieldMapper::new(move |data| {
        if !data.contains_key(&field) {
            data.insert(field.clone(), value.clone());
        }
        Ok(())
    })
}

/// Remove fields.
pub fn remove_fields<I, S>(fields: I) -> FieldMapper
where
    I: IntoIterator<Item = S>,
    S: Into<String>
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    FieldMapper::new(move |data| {
        for field in &fields {
            data.remove(field);
        }
        Ok(())
    })
}

/// Compute `output` from several inputs.
///
/// No-op unless every input is present. Inputs other than `output` are
/// removed after a successful computation.
pub fn compute_field<I, S, F, E>(inputs: I, output: impl Into<String>, compute: F) -> FieldMapper
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&RecordData) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>
{
    let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
    let output = output.into();
    FieldMapper::new(move |data| {
        let mut values = RecordData::new();
        for field in &inputs {
            match data.get(field) {
                Some(value) => {
                    values.insert(field.clone(), value.clone());
                }
                None => return Ok(())
            }
        }
        let result = compute(&values)
            .map_err(|e| MapperError::new(format!("{inputs:?} -> {output:?}"), e))?;
        for field in inputs.iter().filter(|f| **f != output) {
            data.remove(field);
        }
        data.insert(output.clone(), result);
        Ok(())
    })
}

/// Hash a plaintext password into another field.
///
/// An empty password removes `input` and writes nothing, so edit forms can
/// leave the stored hash unchanged. Non-string input is rejected.
pub fn hash_password(
    input: impl Into<String>,
    output: impl Into<String>,
    generator: Arc<dyn CredentialGenerator>
) -> FieldMapper {
    let input = input.into();
    let output = output.into();
    FieldMapper::new(move |data| {
        let Some(value) = data.get(&input) else {
            return Ok(());
        };
        let Value::String(password) = value else {
            return Err(MapperError::unexpected_type(stage(&input, &output), "string", value));
        };
        if password.is_empty() {
            data.remove(&input);
            return Ok(());
        }
        let hash = generator
            .generate(password)
            .map_err(|e| MapperError::new(stage(&input, &output), e))?;
        data.remove(&input);
        data.insert(output.clone(), Value::String(hash));
        Ok(())
    })
}

fn stage(from: &str, to: &str) -> String {
    format!("{from:?} -> {to:?}")
}
