// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Errors of the admin service layer.
//!
//! Every failure maps to an HTTP-class status through [`AdminError::status`]:
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Unauthenticated`, `InvalidCredentials`, `Auth` | 401 (`Auth(Backend)` is 500) |
//! | `Forbidden` | 403 |
//! | `UnknownSchema` | 404 |
//! | `UnknownField`, `InvalidForm` | 400 |
//! | `Mapper` | 422 |
//! | `Storage`, `Schema`, `DuplicateSchema`, `Config` | 500 |
//!
//! With the `masterror` feature the error converts into
//! `masterror::AppError` with the matching kind.

use thiserror::Error;
use vent_core::{AuthError, ClientError, Denied, MapperError, SchemaError};

/// Result alias for admin operations.
pub type AdminResult<T> = Result<T, AdminError>;

/// Failure of an admin operation.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No authenticated principal.
    #[error("authentication required")]
    Unauthenticated,

    /// Unknown login identifier or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Principal lacks a permission.
    #[error(transparent)]
    Forbidden(#[from] Denied),

    /// Schema not registered.
    #[error("unknown schema `{0}`")]
    UnknownSchema(String),

    /// Schema registered twice.
    #[error("schema `{0}` is already registered")]
    DuplicateSchema(String),

    /// Field or relation not declared on a schema.
    #[error("schema `{schema}` has no field `{field}`")]
    UnknownField {
        /// Schema name.
        schema: String,
        /// Field name.
        field:  String
    },

    /// Submitted form value has the wrong shape.
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidForm {
        /// Field name.
        field:  String,
        /// What was expected.
        reason: String
    },

    /// Field mapper rejected the write.
    #[error(transparent)]
    Mapper(#[from] MapperError),

    /// Storage client failure, propagated unchanged.
    #[error("storage error: {0}")]
    Storage(#[source] ClientError),

    /// Credential or token service failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid schema declaration.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Invalid service configuration.
    #[error("invalid configuration: {0}")]
    Config(String)
}

impl AdminError {
    /// Wrap a storage failure.
    pub fn storage(err: ClientError) -> Self {
        Self::Storage(err)
    }

    /// HTTP status class of the error.
    pub const fn status(&self) -> u16 {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials => 401,
            Self::Auth(AuthError::Backend(_)) => 500,
            Self::Auth(_) => 401,
            Self::Forbidden(_) => 403,
            Self::UnknownSchema(_) => 404,
            Self::UnknownField { .. } | Self::InvalidForm { .. } => 400,
            Self::Mapper(_) => 422,
            Self::Storage(_) | Self::Schema(_) | Self::DuplicateSchema(_) | Self::Config(_) => 500
        }
    }

    /// Check if the caller must (re)authenticate.
    pub const fn is_unauthenticated(&self) -> bool {
        self.status() == 401
    }

    /// Check if the caller is authenticated but not permitted.
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

#[cfg(feature = "masterror")]
impl From<AdminError> for masterror::AppError {
    fn from(err: AdminError) -> Self {
        let status = err.status();
        let message = err.to_string();
        match status {
            401 => Self::unauthorized(message),
            403 => Self::forbidden(message),
            404 => Self::not_found(message),
            400 => Self::bad_request(message),
            422 => Self::validation(message),
            _ => Self::internal(message)
        }
    }
}
