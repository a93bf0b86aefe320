// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vent_core::prelude::*;
//! ```

pub use crate::{
    Action, AuthError, Authorizer, Claims, ClientError, CredentialAuthenticator,
    CredentialGenerator, Denied, EdgePath, EntityData, FieldConfig, FieldMapper, FieldSet,
    FieldType, FieldValue, GetOptions, MapperError, PRINCIPAL_EDGE_PATHS, QueryOptions,
    RecordData, RelationData, RelationDef, RelationValue, SchemaClient, SchemaConfig,
    SchemaError, SecretProvider, SelectOption, SortDirection, TokenAuthenticator,
    TokenGenerator, async_trait,
    mapper::{
        compute_field, hash_password, map_field, remove_fields, rename_field, set_default,
        transform_field
    },
    parse_edge_paths
};
