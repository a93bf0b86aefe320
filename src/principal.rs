// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The identity an operation runs as.

use vent_core::EntityData;

/// Caller of an admin operation.
///
/// Produced by [`AdminService::authenticate`](crate::AdminService::authenticate)
/// and passed explicitly to every operation. A user principal carries its
/// groups and permissions eager-loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Principal {
    /// No session.
    #[default]
    Anonymous,

    /// Authenticated user record.
    User(EntityData)
}

impl Principal {
    /// Check if no user is authenticated.
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// User record, if authenticated.
    pub const fn user(&self) -> Option<&EntityData> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user)
        }
    }

    /// Record id of the user, if authenticated.
    pub fn id(&self) -> Option<i64> {
        self.user().map(EntityData::id)
    }
}

impl From<EntityData> for Principal {
    fn from(user: EntityData) -> Self {
        Self::User(user)
    }
}
