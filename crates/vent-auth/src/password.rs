// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng
    }
};
use vent_core::{AuthError, CredentialAuthenticator, CredentialGenerator};

/// Argon2id hasher with the crate's recommended parameters.
///
/// Hashes are self-describing PHC strings (`$argon2id$v=19$...`) carrying
/// their own salt and parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Credentials {
    argon2: Argon2<'static>
}

impl Argon2Credentials {
    /// Hasher with explicit parameters.
    pub fn new(argon2: Argon2<'static>) -> Self {
        Self {
            argon2
        }
    }
}

impl CredentialGenerator for Argon2Credentials {
    fn generate(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Backend(format!("failed to hash password: {e}")))
    }
}

impl CredentialAuthenticator for Argon2Credentials {
    fn authenticate(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::Backend(format!("invalid password hash format: {e}")))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(password_hash::Error::Password) => Err(AuthError::PasswordMismatch),
            Err(e) => Err(AuthError::Backend(format!("failed to verify password: {e}")))
        }
    }
}
