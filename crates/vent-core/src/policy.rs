// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Authorization over the user → group → permission graph.
//!
//! A principal is an [`EntityData`] fetched with its groups and their
//! permissions eager-loaded ([`PRINCIPAL_EDGE_PATHS`]). Authorization is a
//! pure function of that record:
//!
//! 1. a truthy superuser flag grants everything without traversal;
//! 2. otherwise the permission names reachable through groups are collected;
//! 3. the request passes iff every required name is in that set.
//!
//! A principal whose groups were not loaded has no permissions. That case is
//! logged and denied, never treated as a pass.

use std::collections::BTreeSet;

use crate::{entity::EntityData, error::Denied};

/// Edge paths to eager-load on a principal before authorizing it.
pub const PRINCIPAL_EDGE_PATHS: &[&str] = &["groups__permissions"];

/// Operation kind for permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read records.
    View,
    /// Create a record.
    Add,
    /// Update a record.
    Change,
    /// Delete a record.
    Delete
}

impl Action {
    /// Prefix of the permission name, e.g. `view_`.
    pub const fn permission_prefix(&self) -> &'static str {
        match self {
            Self::View => "view_",
            Self::Add => "add_",
            Self::Change => "change_",
            Self::Delete => "delete_"
        }
    }

    /// Check if this is a read-only operation.
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::View)
    }

    /// Check if this is a mutation operation.
    pub const fn is_mutation(&self) -> bool {
        !self.is_read_only()
    }

    /// Permission name for a schema: prefix plus lower-cased schema name.
    ///
    /// ```rust
    /// use vent_core::Action;
    ///
    /// assert_eq!(Action::Change.permission_for("User"), "change_user");
    /// ```
    pub fn permission_for(&self, schema: &str) -> String {
        format!("{}{}", self.permission_prefix(), schema.to_lowercase())
    }
}

/// Field and edge names of the permission graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorizer {
    /// Bool field granting every permission.
    pub superuser_field:  String,
    /// Relation from principal to groups.
    pub groups_edge:      String,
    /// Relation from group to permissions.
    pub permissions_edge: String,
    /// Permission name field.
    pub name_field:       String
}

impl Default for Authorizer {
    fn default() -> Self {
        Self {
            superuser_field:  "is_superuser".into(),
            groups_edge:      "groups".into(),
            permissions_edge: "permissions".into(),
            name_field:       "name".into()
        }
    }
}

impl Authorizer {
    /// Edge paths this graph needs loaded on a principal.
    pub fn edge_paths(&self) -> Vec<String> {
        vec![format!(
            "{}{}{}",
            self.groups_edge,
            crate::edge::EDGE_SEPARATOR,
            self.permissions_edge
        )]
    }

    /// Check if the principal carries a truthy superuser flag.
    pub fn is_superuser(&self, principal: &EntityData) -> bool {
        principal.get_bool(&self.superuser_field)
    }

    /// Permission names granted through the principal's groups.
    pub fn permissions(&self, principal: &EntityData) -> BTreeSet<String> {
        let Some(groups) = principal.get_edges(&self.groups_edge) else {
            tracing::warn!(
                principal = principal.id(),
                edge = %self.groups_edge,
                "groups not loaded on principal; granting no permissions"
            );
            return BTreeSet::new();
        };

        groups
            .iter()
            .filter_map(|group| group.get_edges(&self.permissions_edge))
            .flatten()
            .map(|permission| permission.get_string(&self.name_field))
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Check that the principal holds every required permission.
    ///
    /// # Errors
    ///
    /// [`Denied`] naming the first missing permission.
    pub fn authorize<I, S>(&self, principal: &EntityData, required: I) -> Result<(), Denied>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        if self.is_superuser(principal) {
            tracing::debug!(principal = principal.id(), "superuser bypass");
            return Ok(());
        }

        let mut required = required.into_iter().peekable();
        if required.peek().is_none() {
            return Ok(());
        }

        let granted = self.permissions(principal);
        for permission in required {
            let permission = permission.as_ref();
            if !granted.contains(permission) {
                tracing::warn!(principal = principal.id(), permission, "permission denied");
                return Err(Denied::new(permission));
            }
        }
        Ok(())
    }

    /// Boolean form of [`Authorizer::authorize`].
    pub fn is_authorized<I, S>(&self, principal: &EntityData, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        self.authorize(principal, required).is_ok()
    }
}
