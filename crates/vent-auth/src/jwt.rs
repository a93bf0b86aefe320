// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HS256 session tokens.

use std::{fmt, sync::Arc};

use chrono::TimeDelta;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use vent_core::{AuthError, Claims, SecretProvider, TokenAuthenticator, TokenGenerator};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signs and verifies HS256 JWTs carrying [`Claims`].
///
/// The secret is read from the provider on every call, so rotating it takes
/// effect immediately and invalidates outstanding tokens.
#[derive(Clone)]
pub struct JwtTokens {
    secret: Arc<dyn SecretProvider>,
    ttl:    TimeDelta
}

impl JwtTokens {
    /// Tokens signed with `secret`, valid for 24 hours.
    pub fn new(secret: impl SecretProvider + 'static) -> Self {
        Self {
            secret: Arc::new(secret),
            ttl:    TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS)
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lifetime of issued tokens.
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Sign fresh claims for a user.
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        self.generate(&Claims::for_user(user_id, self.ttl)?)
    }

    fn secret(&self) -> Result<Vec<u8>, AuthError> {
        let secret = self.secret.secret();
        if secret.is_empty() {
            return Err(AuthError::Backend("token secret is empty".into()));
        }
        Ok(secret)
    }
}

impl fmt::Debug for JwtTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenGenerator for JwtTokens {
    fn generate(&self, claims: &Claims) -> Result<String, AuthError> {
        let secret = self.secret()?;
        encode(&Header::default(), claims, &EncodingKey::from_secret(&secret))
            .map_err(|e| AuthError::Backend(format!("failed to sign token: {e}")))
    }
}

impl TokenAuthenticator for JwtTokens {
    fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self.secret()?;
        match decode::<Claims>(token, &DecodingKey::from_secret(&secret), &Validation::default()) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                match err.kind() {
                    ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                    _ => Err(AuthError::InvalidToken(err.to_string()))
                }
            }
        }
    }
}
