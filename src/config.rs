// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Admin service configuration.
//!
//! [`AdminConfig`] deserializes from any serde format; omitted keys take
//! their defaults:
//!
//! | Key | Default |
//! |-----|---------|
//! | `base_path` | `/admin/` |
//! | `cookie_name` | `vent-auth-token` |
//! | `user_schema` | `User` |
//! | `login_field` | `email` |
//! | `password_field` | `password_hash` |
//! | `token_ttl_secs` | `86400` |

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use vent_core::SchemaConfig;

use crate::error::AdminError;

/// Longest accepted session token lifetime: ten years.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Settings of an [`AdminService`](crate::AdminService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// URL prefix of the admin surface; starts and ends with `/`.
    pub base_path:      String,
    /// Name of the cookie carrying the session token.
    pub cookie_name:    String,
    /// Schema holding principals.
    pub user_schema:    String,
    /// Field matched against the login identifier.
    pub login_field:    String,
    /// Field holding the password hash.
    pub password_field: String,
    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_path:      "/admin/".into(),
            cookie_name:    "vent-auth-token".into(),
            user_schema:    "User".into(),
            login_field:    "email".into(),
            password_field: "password_hash".into(),
            token_ttl_secs: 24 * 60 * 60
        }
    }
}

impl AdminConfig {
    /// Check the settings.
    ///
    /// # Errors
    ///
    /// [`AdminError::Config`] when the base path is not wrapped in `/`, a
    /// name is blank or the token lifetime is out of range.
    pub fn validate(&self) -> Result<(), AdminError> {
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(AdminError::Config(format!(
                "base_path `{}` must start and end with `/`",
                self.base_path
            )));
        }
        let names = [
            ("cookie_name", &self.cookie_name),
            ("user_schema", &self.user_schema),
            ("login_field", &self.login_field),
            ("password_field", &self.password_field)
        ];
        if let Some((key, _)) = names.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AdminError::Config(format!("{key} must not be empty")));
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(AdminError::Config(format!(
                "token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}"
            )));
        }
        Ok(())
    }

    /// Session token lifetime.
    pub fn token_ttl(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.token_ttl_secs).unwrap_or(TimeDelta::MAX)
    }

    /// URL of the login page.
    pub fn login_url(&self) -> String {
        format!("{}login/", self.base_path)
    }

    /// URL of a schema's record list.
    pub fn schema_url(&self, schema: &SchemaConfig) -> String {
        format!("{}{}", self.base_path, schema.path())
    }

    /// URL of one record.
    pub fn entity_url(&self, schema: &SchemaConfig, id: i64) -> String {
        format!("{}{}", self.base_path, schema.entity_path(id))
    }
}
