// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema metadata: fields, relations and display layout of one record type.
//!
//! A [`SchemaConfig`] is declared once at startup through
//! [`SchemaConfig::builder`], validated by [`SchemaConfigBuilder::build`] and
//! never mutated afterwards. Share it through `Arc`.
//!
//! # Derived names
//!
//! | Accessor | `User` schema |
//! |----------|---------------|
//! | [`SchemaConfig::path`] | `users/` |
//! | [`SchemaConfig::entity_path`] | `users/42/` |
//! | [`SchemaConfig::permission`] | `view_user`, `add_user`, `change_user`, `delete_user` |
//!
//! # Example
//!
//! ```rust,ignore
//! use vent_core::prelude::*;
//!
//! let users = SchemaConfig::builder("User", client)
//!     .display_field("email")
//!     .field(FieldConfig::new("id", FieldType::Int).read_only())
//!     .field(FieldConfig::new("email", FieldType::String).input_type("email"))
//!     .field(
//!         FieldConfig::new("groups", FieldType::Relation)
//!             .relation(RelationDef::to_many("Group", "name", "groups/"))
//!     )
//!     .columns(["id", "email"])
//!     .build()?;
//! ```

use std::{collections::HashSet, fmt, sync::Arc};

use crate::{
    client::SchemaClient,
    entity::{EntityData, ID_FIELD},
    error::{MapperError, SchemaError},
    mapper::{FieldMapper, RecordData, chain_field_mappers},
    policy::Action,
    value::FieldType
};

/// Where a relation field points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDef {
    /// Target schema name, e.g. `"Group"`.
    pub target_schema:  String,
    /// Target field shown as the related record's label.
    pub target_display: String,
    /// Path of the target schema, e.g. `"groups/"`.
    pub target_path:    String,
    /// To-one relation when set, to-many otherwise.
    pub unique:         bool
}

impl RelationDef {
    /// Single-record relation (foreign key).
    pub fn to_one(
        target_schema: impl Into<String>,
        target_display: impl Into<String>,
        target_path: impl Into<String>
    ) -> Self {
        Self {
            target_schema:  target_schema.into(),
            target_display: target_display.into(),
            target_path:    target_path.into(),
            unique:         true
        }
    }

    /// Multi-record relation.
    pub fn to_many(
        target_schema: impl Into<String>,
        target_display: impl Into<String>,
        target_path: impl Into<String>
    ) -> Self {
        Self {
            unique: false,
            ..Self::to_one(target_schema, target_display, target_path)
        }
    }

    /// Check if the relation holds at most one record.
    pub const fn is_to_one(&self) -> bool {
        self.unique
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Field name as stored.
    pub name:       String,
    /// Human label.
    pub label:      String,
    /// Value type.
    pub field_type: FieldType,
    /// Input widget override, e.g. `"password"`.
    pub input_type: Option<String>,
    /// Whether forms may write the field.
    pub editable:   bool,
    /// Target of a relation field.
    pub relation:   Option<RelationDef>
}

impl FieldConfig {
    /// Editable field labelled with its name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            field_type,
            input_type: None,
            editable: true,
            relation: None
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Override the input widget.
    #[must_use]
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Exclude the field from form writes.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Attach a relation target.
    #[must_use]
    pub fn relation(mut self, relation: RelationDef) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Input widget: the override if set, else the type name.
    pub fn effective_input_type(&self) -> &str {
        self.input_type
            .as_deref()
            .unwrap_or(self.field_type.as_str())
    }
}

/// Named group of fields on a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet {
    /// Heading, if any.
    pub label:  Option<String>,
    /// Field names in display order.
    pub fields: Vec<String>
}

impl FieldSet {
    /// Untitled field set.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            label:  None,
            fields: fields.into_iter().map(Into::into).collect()
        }
    }

    /// Set the heading.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Validated metadata of one record type.
#[derive(Clone)]
pub struct SchemaConfig {
    name:          String,
    display_field: Option<String>,
    columns:       Vec<String>,
    fields:        Vec<FieldConfig>,
    field_sets:    Vec<FieldSet>,
    mappers:       Option<FieldMapper>,
    client:        Arc<dyn SchemaClient>
}

impl SchemaConfig {
    /// Start declaring a schema bound to `client`.
    pub fn builder(name: impl Into<String>, client: Arc<dyn SchemaClient>) -> SchemaConfigBuilder {
        SchemaConfigBuilder {
            name: name.into(),
            display_field: None,
            columns: Vec::new(),
            fields: Vec::new(),
            field_sets: Vec::new(),
            mappers: Vec::new(),
            client
        }
    }

    /// Schema name, e.g. `"User"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field used as the record label.
    pub fn display_field(&self) -> Option<&str> {
        self.display_field.as_deref()
    }

    /// Relative path of the schema: lower-cased name plus `s/`.
    pub fn path(&self) -> String {
        format!("{}s/", self.name.to_lowercase())
    }

    /// Relative path of one record.
    pub fn entity_path(&self, id: i64) -> String {
        format!("{}{id}/", self.path())
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    /// List columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Form field sets.
    pub fn field_sets(&self) -> &[FieldSet] {
        &self.field_sets
    }

    /// Field by name.
    pub fn lookup_field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Relation definition of the field `name`.
    pub fn get_edge(&self, name: &str) -> Option<&RelationDef> {
        self.lookup_field(name).and_then(|f| f.relation.as_ref())
    }

    /// Names of all relation-bearing fields.
    pub fn edge_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.relation.is_some())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Fields shown on a form: field-set order when sets are declared,
    /// declaration order otherwise.
    pub fn form_fields(&self) -> Vec<&FieldConfig> {
        if self.field_sets.is_empty() {
            return self.fields.iter().collect();
        }
        self.field_sets
            .iter()
            .flat_map(|set| set.fields.iter())
            .filter_map(|name| self.lookup_field(name))
            .collect()
    }

    /// Human label of a record.
    ///
    /// The display field's text when set and non-empty, else `"<Name> <id>"`.
    pub fn entity_display(&self, entity: &EntityData) -> String {
        self.display_field
            .as_deref()
            .and_then(|field| entity.get(field))
            .map(|value| value.display())
            .filter(|display| !display.is_empty())
            .map_or_else(
                || format!("{} {}", self.name, entity.id()),
                str::to_owned
            )
    }

    /// Permission name required for `action`.
    pub fn permission(&self, action: Action) -> String {
        action.permission_for(&self.name)
    }

    /// Run the mapper pipeline on `data`. No-op without mappers.
    pub fn apply_field_mappers(&self, data: &mut RecordData) -> Result<(), MapperError> {
        match &self.mappers {
            Some(mapper) => mapper.apply(data),
            None => Ok(())
        }
    }

    /// Check if a mapper pipeline is configured.
    pub const fn has_field_mappers(&self) -> bool {
        self.mappers.is_some()
    }

    /// Storage client of the schema.
    pub fn client(&self) -> &Arc<dyn SchemaClient> {
        &self.client
    }
}

impl fmt::Debug for SchemaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaConfig")
            .field("name", &self.name)
            .field("display_field", &self.display_field)
            .field("columns", &self.columns)
            .field("fields", &self.fields)
            .field("field_sets", &self.field_sets)
            .field("mappers", &self.mappers.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`SchemaConfig::builder`].
pub struct SchemaConfigBuilder {
    name:          String,
    display_field: Option<String>,
    columns:       Vec<String>,
    fields:        Vec<FieldConfig>,
    field_sets:    Vec<FieldSet>,
    mappers:       Vec<FieldMapper>,
    client:        Arc<dyn SchemaClient>
}

impl SchemaConfigBuilder {
    /// Field used as the record label.
    #[must_use]
    pub fn display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = Some(field.into());
        self
    }

    /// Declare a field.
    #[must_use]
    pub fn field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a list column.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append list columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append a form field set.
    #[must_use]
    pub fn field_set(mut self, set: FieldSet) -> Self {
        self.field_sets.push(set);
        self
    }

    /// Append mappers to the write pipeline.
    #[must_use]
    pub fn field_mappers<I>(mut self, mappers: I) -> Self
    where
        I: IntoIterator<Item = FieldMapper>
    {
        self.mappers.extend(mappers);
        self
    }

    /// Validate and freeze the schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptyName`] for a blank name
    /// - [`SchemaError::DuplicateField`] when a field is declared twice
    /// - [`SchemaError::UnknownField`] when a column, field set entry or the
    ///   display field is not declared (`id` is always accepted)
    /// - [`SchemaError::MissingRelation`] for a relation-typed field without
    ///   a [`RelationDef`]
    pub fn build(self) -> Result<SchemaConfig, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let mut declared = HashSet::new();
        for field in &self.fields {
            if !declared.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field:  field.name.clone()
                });
            }
            if field.field_type.is_relation() && field.relation.is_none() {
                return Err(SchemaError::MissingRelation {
                    schema: self.name.clone(),
                    field:  field.name.clone()
                });
            }
        }

        let referenced = self
            .columns
            .iter()
            .chain(self.field_sets.iter().flat_map(|s| s.fields.iter()))
            .chain(self.display_field.iter());
        for name in referenced {
            if name != ID_FIELD && !declared.contains(name.as_str()) {
                return Err(SchemaError::UnknownField {
                    schema: self.name.clone(),
                    field:  name.clone()
                });
            }
        }

        let mappers = (!self.mappers.is_empty()).then(|| chain_field_mappers(self.mappers));
        tracing::debug!(
            schema = %self.name,
            fields = self.fields.len(),
            mappers = mappers.is_some(),
            "schema declared"
        );

        Ok(SchemaConfig {
            name: self.name,
            display_field: self.display_field,
            columns: self.columns,
            fields: self.fields,
            field_sets: self.field_sets,
            mappers,
            client: self.client
        })
    }
}
