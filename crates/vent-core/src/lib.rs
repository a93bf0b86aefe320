// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core types for the vent admin engine.
//!
//! This crate holds everything the engine knows about records without
//! knowing how they are stored or rendered:
//!
//! - [`FieldValue`] / [`EntityData`]: typed, self-describing record fields,
//!   including relations that may or may not have been eager-loaded
//! - [`parse_edge_paths`]: the `parent__child` eager-loading language
//! - [`SchemaConfig`]: declared fields, relations and layout of a record type
//! - [`SchemaClient`]: the storage contract, implemented per schema
//! - [`FieldMapper`]: transforms applied to submitted data before a write
//! - [`Authorizer`]: the user → group → permission check
//! - [`CredentialGenerator`], [`TokenAuthenticator`], …: pluggable auth
//!   services (defaults live in `vent-auth`)
//!
//! # Usage
//!
//! ```rust
//! use vent_core::prelude::*;
//!
//! let admins = EntityData::new().with("name", "view_user");
//! let group = EntityData::new().with(
//!     "permissions",
//!     FieldValue::relation(RelationData::loaded("Permission", "permissions/", vec![admins]))
//! );
//! let user = EntityData::new().with("id", 1).with(
//!     "groups",
//!     FieldValue::relation(RelationData::loaded("Group", "groups/", vec![group]))
//! );
//!
//! let auth = Authorizer::default();
//! assert!(auth.is_authorized(&user, ["view_user"]));
//! assert!(!auth.is_authorized(&user, ["delete_user"]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod edge;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod policy;
pub mod prelude;
pub mod schema;
pub mod value;

/// Re-export async_trait for storage client implementations.
pub use async_trait::async_trait;
pub use auth::{
    Claims, CredentialAuthenticator, CredentialGenerator, SecretProvider, TokenAuthenticator,
    TokenGenerator
};
pub use client::{GetOptions, QueryOptions, SchemaClient, SelectOption, SortDirection};
pub use edge::{EDGE_SEPARATOR, EdgePath, flatten_edge_paths, parse_edge_paths};
pub use entity::{EntityData, ID_FIELD};
pub use error::{
    AuthError, BoxError, ClientError, Denied, MapperError, SchemaError, TypeMismatch
};
pub use mapper::{FieldMapper, RecordData, chain_field_mappers};
pub use policy::{Action, Authorizer, PRINCIPAL_EDGE_PATHS};
pub use schema::{FieldConfig, FieldSet, RelationDef, SchemaConfig, SchemaConfigBuilder};
pub use value::{FieldType, FieldValue, RelationData, RelationValue};
