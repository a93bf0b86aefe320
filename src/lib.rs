// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # vent
//!
//! Schema-driven admin engine. Declare record types once; get typed records,
//! relation eager-loading, a write pipeline and group-based permissions.
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`vent_core`] | values, entities, edge paths, schemas, storage contract, field mappers, authorization |
//! | `vent_auth` (feature `auth`) | Argon2 credentials, HS256 session tokens |
//! | `vent` | configuration, schema registry, admin service |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vent::prelude::*;
//!
//! let users = SchemaConfig::builder("User", Arc::new(UserStore::new(pool.clone())))
//!     .display_field("email")
//!     .field(FieldConfig::new("id", FieldType::Int).read_only())
//!     .field(FieldConfig::new("email", FieldType::String))
//!     .field(FieldConfig::new("password", FieldType::String).input_type("password"))
//!     .field(
//!         FieldConfig::new("groups", FieldType::Relation)
//!             .relation(RelationDef::to_many("Group", "name", "groups/"))
//!     )
//!     .columns(["id", "email"])
//!     .field_mappers([hash_password("password", "password_hash", Arc::new(Argon2Credentials::default()))])
//!     .build()?;
//!
//! let registry = SchemaRegistry::new().with(users)?.with(groups)?.with(permissions)?;
//! let admin = AdminService::builder(AdminConfig::default(), registry)
//!     .default_auth(secret)
//!     .build()?;
//!
//! let token = admin.login("alice@example.com", "hunter2").await?;
//! let principal = admin.authenticate(Some(&token)).await?;
//! let rows = admin.list(&principal, "User", QueryOptions::new()).await?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Adds |
//! |---------|---------|------|
//! | `auth` | yes | `vent_auth` re-exports, [`AdminServiceBuilder::default_auth`] |
//! | `masterror` | no | `From<AdminError> for masterror::AppError` |
//!
//! ## Logging
//!
//! The crates emit `tracing` events (`info` for logins and writes, `warn`
//! for denials and principals without loaded groups, `debug` for decisions)
//! and never install a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod form;
pub mod prelude;
pub mod principal;
pub mod registry;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::{AdminConfig, MAX_TOKEN_TTL_SECS};
pub use error::{AdminError, AdminResult};
pub use form::coerce_form;
pub use principal::Principal;
pub use registry::SchemaRegistry;
pub use service::{AdminService, AdminServiceBuilder, SchemaLink};
#[cfg(feature = "auth")]
#[cfg_attr(docsrs, doc(cfg(feature = "auth")))]
pub use vent_auth::{self, Argon2Credentials, JwtTokens};
pub use vent_core::{self, *};
