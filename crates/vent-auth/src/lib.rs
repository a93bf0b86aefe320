// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Default credential and token services for vent.
//!
//! | Type | Implements | Mechanism |
//! |------|------------|-----------|
//! | [`Argon2Credentials`] | `CredentialGenerator`, `CredentialAuthenticator` | argon2id, PHC strings |
//! | [`JwtTokens`] | `TokenGenerator`, `TokenAuthenticator` | HS256 JWT, 24h default lifetime |
//!
//! # Usage
//!
//! ```rust
//! use vent_auth::{Argon2Credentials, JwtTokens};
//! use vent_core::{Claims, CredentialAuthenticator, CredentialGenerator, TokenAuthenticator, TokenGenerator};
//!
//! let credentials = Argon2Credentials::default();
//! let hash = credentials.generate("hunter2").unwrap();
//! assert!(credentials.authenticate("hunter2", &hash).is_ok());
//!
//! let tokens = JwtTokens::new(b"0123456789abcdef0123456789abcdef".to_vec());
//! let token = tokens.generate(&Claims::for_user(42, tokens.ttl()).unwrap()).unwrap();
//! assert_eq!(tokens.authenticate(&token).unwrap().user_id().unwrap(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod jwt;
mod password;

pub use jwt::{DEFAULT_TOKEN_TTL_SECS, JwtTokens};
pub use password::Argon2Credentials;
