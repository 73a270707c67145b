//! `[[nav]]` section configuration.
//!
//! The static navigation tree rendered on every page. Entries are ordered as
//! written in inka.toml and may nest children arbitrarily deep.

use serde::{Deserialize, Serialize};

/// A single navigation entry.
///
/// # Example
/// ```toml
/// [[nav]]
/// title = "Home"
/// path = "/"
///
/// [[nav]]
/// title = "Projects"
/// path = "/projects/"
///
///   [[nav.children]]
///   title = "inka"
///   path = "/projects/inka/"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    /// Link text.
    pub title: String,

    /// Site-absolute path, must start with `/`.
    pub path: String,

    /// Nested entries, rendered as a sub-list.
    #[serde(default)]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Depth-first iteration over this entry and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavEntry)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Collect every entry in the tree, depth-first.
pub fn flatten(entries: &[NavEntry]) -> Vec<&NavEntry> {
    let mut flat = Vec::new();
    for entry in entries {
        entry.walk(&mut |e| flat.push(e));
    }
    flat
}
