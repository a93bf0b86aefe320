// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pluggable authentication services.
//!
//! The engine only needs these shapes; hashing and token mechanics live in
//! implementations (see the `vent-auth` crate). Every trait is implemented
//! for matching closures, which keeps tests and small deployments free of
//! boilerplate:
//!
//! ```rust
//! use vent_core::{AuthError, CredentialAuthenticator};
//!
//! let check = |password: &str, hash: &str| {
//!     if password == hash { Ok(()) } else { Err(AuthError::PasswordMismatch) }
//! };
//! assert!(check.authenticate("a", "a").is_ok());
//! ```

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Turns a plaintext password into a storable hash.
pub trait CredentialGenerator: Send + Sync {
    /// Hash `password`.
    fn generate(&self, password: &str) -> Result<String, AuthError>;
}

impl<F> CredentialGenerator for F
where
    F: Fn(&str) -> Result<String, AuthError> + Send + Sync
{
    fn generate(&self, password: &str) -> Result<String, AuthError> {
        self(password)
    }
}

/// Checks a plaintext password against a stored hash.
pub trait CredentialAuthenticator: Send + Sync {
    /// `Ok` when `password` matches `hash`.
    fn authenticate(&self, password: &str, hash: &str) -> Result<(), AuthError>;
}

impl<F> CredentialAuthenticator for F
where
    F: Fn(&str, &str) -> Result<(), AuthError> + Send + Sync
{
    fn authenticate(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        self(password, hash)
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's record id as a string.
    pub sub: String,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64
}

impl Claims {
    /// Claims for a user id, valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidClaims`] when the expiry is not representable.
    pub fn for_user(user_id: i64, ttl: TimeDelta) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::InvalidClaims("token lifetime is out of range".into()))?;
        Ok(Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp()
        })
    }

    /// Record id of the subject.
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidClaims("subject is not a record id".into()))
    }

    /// Check if the claims have expired at Unix time `now`.
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Issues signed tokens.
pub trait TokenGenerator: Send + Sync {
    /// Sign `claims`.
    fn generate(&self, claims: &Claims) -> Result<String, AuthError>;
}

impl<F> TokenGenerator for F
where
    F: Fn(&Claims) -> Result<String, AuthError> + Send + Sync
{
    fn generate(&self, claims: &Claims) -> Result<String, AuthError> {
        self(claims)
    }
}

/// Verifies tokens and recovers their claims.
pub trait TokenAuthenticator: Send + Sync {
    /// Verify `token`.
    fn authenticate(&self, token: &str) -> Result<Claims, AuthError>;
}

impl<F> TokenAuthenticator for F
where
    F: Fn(&str) -> Result<Claims, AuthError> + Send + Sync
{
    fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        self(token)
    }
}

/// Source of the token signing secret.
pub trait SecretProvider: Send + Sync {
    /// Secret bytes.
    fn secret(&self) -> Vec<u8>;
}

impl<F> SecretProvider for F
where
    F: Fn() -> Vec<u8> + Send + Sync
{
    fn secret(&self) -> Vec<u8> {
        self()
    }
}

impl SecretProvider for Vec<u8> {
    fn secret(&self) -> Vec<u8> {
        self.clone()
    }
}

impl SecretProvider for &'static [u8] {
    fn secret(&self) -> Vec<u8> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_for_user() {
        let claims = Claims::for_user(42, TimeDelta::hours(24)).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.is_expired_at(claims.iat));
        assert!(claims.is_expired_at(claims.exp));
    }

    #[test]
    fn claims_with_unrepresentable_expiry() {
        let ttl = TimeDelta::try_seconds(1_000_000_000_000_000).unwrap();
        assert!(matches!(
            Claims::for_user(1, ttl),
            Err(AuthError::InvalidClaims(_))
        ));
        assert!(Claims::for_user(1, TimeDelta::MAX).is_err());
    }

    #[test]
    fn claims_with_non_numeric_subject() {
        let claims = Claims {
            sub: "alice".into(),
            iat: 0,
            exp: 1
        };
        assert!(matches!(claims.user_id(), Err(AuthError::InvalidClaims(_))));
    }

    #[test]
    fn closures_implement_services() {
        let generator = |password: &str| Ok::<_, AuthError>(format!("hashed:{password}"));
        assert_eq!(
            CredentialGenerator::generate(&generator, "pw").unwrap(),
            "hashed:pw"
        );

        let tokens = |claims: &Claims| Ok::<_, AuthError>(claims.sub.clone());
        let claims = Claims::for_user(7, TimeDelta::minutes(5)).unwrap();
        assert_eq!(TokenGenerator::generate(&tokens, &claims).unwrap(), "7");

        let secret: &'static [u8] = b"secret";
        assert_eq!(secret.secret(), b"secret".to_vec());
        assert_eq!((|| vec![1u8, 2]).secret(), vec![1, 2]);
    }
}
