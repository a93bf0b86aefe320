// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage contract.
//!
//! The engine never talks to a database. Each schema is bound to a
//! [`SchemaClient`] implemented by the storage layer (usually generated
//! code); its errors are opaque and propagated unchanged.
//!
//! Cancellation is inherited from the caller: dropping a returned future
//! abandons the call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    edge::{EdgePath, parse_edge_paths},
    entity::EntityData,
    error::ClientError,
    mapper::RecordData,
    schema::RelationDef
};

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }

    /// Check if this is descending order.
    pub const fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

/// Options for [`SchemaClient::list`].
///
/// `limit` and `offset` of 0 mean "unset".
///
/// # Example
///
/// ```rust
/// use vent_core::{QueryOptions, SortDirection};
///
/// let opts = QueryOptions::new()
///     .order_by("id", SortDirection::Desc)
///     .filter("email", "alice@example.com")
///     .limit(1)
///     .with_edges(["groups__permissions"]);
/// assert_eq!(opts.edge_paths()[0].name, "groups");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryOptions {
    /// Field to order by.
    pub order_by:   Option<String>,
    /// Direction of `order_by`.
    pub order:      SortDirection,
    /// Maximum number of results, 0 for no limit.
    pub limit:      usize,
    /// Number of results to skip.
    pub offset:     usize,
    /// Equality filters, field name → value.
    pub filters:    BTreeMap<String, Value>,
    /// Flat edge paths to eager-load.
    pub with_edges: Vec<String>
}

impl QueryOptions {
    /// Unfiltered, unordered, unlimited query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order results by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, order: SortDirection) -> Self {
        self.order_by = Some(field.into());
        self.order = order;
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Skip results.
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Add an equality filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Request eager loading of the given edge paths.
    #[must_use]
    pub fn with_edges<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.with_edges.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Eager-load request as a tree.
    pub fn edge_paths(&self) -> Vec<EdgePath> {
        parse_edge_paths(&self.with_edges)
    }
}

/// Options for [`SchemaClient::get`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetOptions {
    /// Flat edge paths to eager-load.
    pub with_edges: Vec<String>
}

impl GetOptions {
    /// Request eager loading of the given edge paths.
    pub fn with_edges<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            with_edges: paths.into_iter().map(Into::into).collect()
        }
    }

    /// Eager-load request as a tree.
    pub fn edge_paths(&self) -> Vec<EdgePath> {
        parse_edge_paths(&self.with_edges)
    }
}

/// Choice for a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Id of the related record.
    pub value: i64,
    /// Display label.
    pub label: String
}

/// CRUD operations for one schema.
///
/// Edge paths in `with_edges` must be loaded into the returned records as
/// loaded relation fields.
#[async_trait]
pub trait SchemaClient: Send + Sync {
    /// Records matching `opts`.
    async fn list(&self, opts: QueryOptions) -> Result<Vec<EntityData>, ClientError>;

    /// Record by id.
    async fn get(&self, id: i64, opts: GetOptions) -> Result<EntityData, ClientError>;

    /// Create a record and return it.
    async fn create(&self, data: RecordData) -> Result<EntityData, ClientError>;

    /// Update a record.
    async fn update(&self, id: i64, data: RecordData) -> Result<(), ClientError>;

    /// Delete a record.
    async fn delete(&self, id: i64) -> Result<(), ClientError>;

    /// Choices for a relation field.
    async fn relation_options(
        &self,
        relation: &RelationDef
    ) -> Result<Vec<SelectOption>, ClientError>;
}
