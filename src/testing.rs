// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fixtures shared by unit tests.

use std::sync::Arc;

use vent_core::{
    ClientError, EntityData, FieldConfig, FieldType, GetOptions, QueryOptions, RecordData,
    RelationDef, SchemaClient, SchemaConfig, SchemaConfigBuilder, SelectOption, async_trait
};

/// Client without records that refuses writes.
pub(crate) struct NullClient;

#[async_trait]
impl SchemaClient for NullClient {
    async fn list(&self, _opts: QueryOptions) -> Result<Vec<EntityData>, ClientError> {
        Ok(Vec::new())
    }

    async fn get(&self, id: i64, _opts: GetOptions) -> Result<EntityData, ClientError> {
        Err(format!("record {id} not found").into())
    }

    async fn create(&self, _data: RecordData) -> Result<EntityData, ClientError> {
        Err("read-only".into())
    }

    async fn update(&self, _id: i64, _data: RecordData) -> Result<(), ClientError> {
        Err("read-only".into())
    }

    async fn delete(&self, _id: i64) -> Result<(), ClientError> {
        Err("read-only".into())
    }

    async fn relation_options(
        &self,
        _relation: &RelationDef
    ) -> Result<Vec<SelectOption>, ClientError> {
        Ok(Vec::new())
    }
}

pub(crate) fn schema(name: &str) -> SchemaConfigBuilder {
    SchemaConfig::builder(name, Arc::new(NullClient))
        .field(FieldConfig::new("id", FieldType::Int).read_only())
}

/// `User` → `Group` → `Permission`, plus `Post` with an author.
pub(crate) fn auth_schemas() -> Vec<SchemaConfig> {
    let user = schema("User")
        .display_field("email")
        .field(FieldConfig::new("email", FieldType::String))
        .field(FieldConfig::new("password", FieldType::String).input_type("password"))
        .field(FieldConfig::new("is_superuser", FieldType::Bool))
        .field(FieldConfig::new("age", FieldType::Int))
        .field(FieldConfig::new("joined", FieldType::Time))
        .field(FieldConfig::new("last_login", FieldType::Time).read_only())
        .field(
            FieldConfig::new("groups", FieldType::Relation)
                .relation(RelationDef::to_many("Group", "name", "groups/"))
        )
        .field(
            FieldConfig::new("manager", FieldType::ForeignKey)
                .relation(RelationDef::to_one("User", "email", "users/"))
        );
    let group = schema("Group")
        .display_field("name")
        .field(FieldConfig::new("name", FieldType::String))
        .field(
            FieldConfig::new("permissions", FieldType::Relation)
                .relation(RelationDef::to_many("Permission", "name", "permissions/"))
        );
    let permission = schema("Permission")
        .display_field("name")
        .field(FieldConfig::new("name", FieldType::String));

    [user, group, permission]
        .into_iter()
        .map(|builder| builder.build().unwrap())
        .collect()
}
