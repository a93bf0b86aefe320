// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Edge paths: nested relation eager-loading requests.
//!
//! Storage clients receive eager-load requests as flat strings where `__`
//! separates a relation from a relation of the related record:
//!
//! ```text
//! ["groups", "groups__permissions", "posts__author"]
//!
//!   groups            posts
//!   └── permissions   └── author
//! ```
//!
//! [`parse_edge_paths`] turns the flat list into that tree. The order of the
//! returned nodes is first-appearance order, but callers should only rely on
//! the set of names at each level.

use std::fmt;

/// Separator between a relation and a nested relation.
pub const EDGE_SEPARATOR: &str = "__";

/// A relation to load together with the relations to load beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgePath {
    /// Relation name, e.g. `"groups"`.
    pub name:     String,
    /// Nested relations, e.g. `"permissions"` under `"groups"`.
    pub children: Vec<EdgePath>
}

impl EdgePath {
    /// Relation without nested loading.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            children: Vec::new()
        }
    }

    /// Return the node with `child` appended.
    #[must_use]
    pub fn with_child(mut self, child: EdgePath) -> Self {
        self.children.push(child);
        self
    }

    /// Nested relation by name.
    pub fn child(&self, name: &str) -> Option<&EdgePath> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Check if no nested relations are requested.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Render back into flat paths, parents before children.
    ///
    /// ```rust
    /// use vent_core::parse_edge_paths;
    ///
    /// let tree = parse_edge_paths(["groups__permissions"]);
    /// assert_eq!(tree[0].flatten(), ["groups", "groups__permissions"]);
    /// ```
    pub fn flatten(&self) -> Vec<String> {
        let mut out = vec![self.name.clone()];
        for child in &self.children {
            out.extend(
                child
                    .flatten()
                    .into_iter()
                    .map(|path| format!("{}{EDGE_SEPARATOR}{path}", self.name))
            );
        }
        out
    }
}

impl fmt::Display for EdgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten().join(", "))
    }
}

/// Parse flat `parent__child` paths into a tree.
///
/// Paths sharing a first segment are merged into one node whose children
/// are parsed from the remaining suffixes. A path without separator yields
/// a leaf; an empty suffix (`"groups__"`) adds no child.
///
/// ```rust
/// use vent_core::parse_edge_paths;
///
/// let tree = parse_edge_paths(["a", "a__b", "c"]);
/// assert_eq!(tree.len(), 2);
/// assert!(tree.iter().any(|e| e.name == "a" && e.child("b").is_some()));
/// assert!(tree.iter().any(|e| e.name == "c" && e.is_leaf()));
/// ```
pub fn parse_edge_paths<I, S>(paths: I) -> Vec<EdgePath>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let (head, rest) = match path.split_once(EDGE_SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None)
        };

        let index = match groups.iter().position(|(name, _)| name == head) {
            Some(index) => index,
            None => {
                groups.push((head.to_owned(), Vec::new()));
                groups.len() - 1
            }
        };

        if let Some(rest) = rest.filter(|rest| !rest.is_empty()) {
            groups[index].1.push(rest.to_owned());
        }
    }

    groups
        .into_iter()
        .map(|(name, rest)| EdgePath {
            name,
            children: parse_edge_paths(rest)
        })
        .collect()
}

/// Render a tree back into flat paths.
pub fn flatten_edge_paths(paths: &[EdgePath]) -> Vec<String> {
    paths.iter().flat_map(EdgePath::flatten).collect()
}
