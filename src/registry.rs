// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Registry of declared schemas.
//!
//! Built once at startup and shared read-only through `Arc`. Schemas are
//! keyed by name; iteration is sorted by name.

use std::{collections::BTreeMap, sync::Arc};

use vent_core::{EdgePath, RelationDef, SchemaConfig, parse_edge_paths};

use crate::error::AdminError;

/// Schemas served by an admin surface.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<SchemaConfig>>
}

impl SchemaRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema.
    ///
    /// # Errors
    ///
    /// [`AdminError::DuplicateSchema`] when the name is taken.
    pub fn register(&mut self, schema: SchemaConfig) -> Result<Arc<SchemaConfig>, AdminError> {
        let name = schema.name().to_owned();
        if self.schemas.contains_key(&name) {
            return Err(AdminError::DuplicateSchema(name));
        }
        let schema = Arc::new(schema);
        tracing::info!(schema = %name, path = %schema.path(), "registered schema");
        self.schemas.insert(name, Arc::clone(&schema));
        Ok(schema)
    }

    /// Builder-style [`SchemaRegistry::register`].
    pub fn with(mut self, schema: SchemaConfig) -> Result<Self, AdminError> {
        self.register(schema)?;
        Ok(self)
    }

    /// Schema by name.
    pub fn get(&self, name: &str) -> Option<&Arc<SchemaConfig>> {
        self.schemas.get(name)
    }

    /// Schema by name, or [`AdminError::UnknownSchema`].
    pub fn require(&self, name: &str) -> Result<&Arc<SchemaConfig>, AdminError> {
        self.get(name)
            .ok_or_else(|| AdminError::UnknownSchema(name.to_owned()))
    }

    /// Schemas sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<SchemaConfig>> {
        self.schemas.values()
    }

    /// Number of schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema a relation points to.
    pub fn relation_target(&self, relation: &RelationDef) -> Option<&Arc<SchemaConfig>> {
        self.get(&relation.target_schema)
    }

    /// Check that every relation targets a registered schema.
    ///
    /// # Errors
    ///
    /// [`AdminError::UnknownSchema`] naming the first missing target.
    pub fn check_relations(&self) -> Result<(), AdminError> {
        for schema in self.iter() {
            for field in schema.fields() {
                if let Some(relation) = &field.relation
                    && self.relation_target(relation).is_none()
                {
                    return Err(AdminError::UnknownSchema(relation.target_schema.clone()));
                }
            }
        }
        Ok(())
    }

    /// Parse eager-load paths for `schema` and check every segment.
    ///
    /// Each segment must be a relation declared on the schema reached by
    /// the segments before it.
    ///
    /// # Errors
    ///
    /// [`AdminError::UnknownSchema`] or [`AdminError::UnknownField`].
    pub fn resolve_edges<I, S>(&self, schema: &str, paths: I) -> Result<Vec<EdgePath>, AdminError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let root = self.require(schema)?;
        let tree = parse_edge_paths(paths);
        self.check_edges(root, &tree)?;
        Ok(tree)
    }

    fn check_edges(&self, schema: &SchemaConfig, edges: &[EdgePath]) -> Result<(), AdminError> {
        for edge in edges {
            let relation = schema
                .get_edge(&edge.name)
                .ok_or_else(|| AdminError::UnknownField {
                    schema: schema.name().to_owned(),
                    field:  edge.name.clone()
                })?;
            if edge.is_leaf() {
                continue;
            }
            let target = self
                .relation_target(relation)
                .ok_or_else(|| AdminError::UnknownSchema(relation.target_schema.clone()))?;
            self.check_edges(target, &edge.children)?;
        }
        Ok(())
    }
}
