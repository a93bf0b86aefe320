// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vent::prelude::*;
//! ```

#[cfg(feature = "auth")]
pub use crate::{Argon2Credentials, JwtTokens};
pub use crate::{
    AdminConfig, AdminError, AdminResult, AdminService, Principal, SchemaRegistry,
    coerce_form
};
pub use vent_core::prelude::*;
