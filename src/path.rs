//! Dotted key paths and the traversal primitives behind [`Document`](crate::Document).
//!
//! `"database.host"` addresses the `host` key of the `database` mapping.
//! There is no escape syntax: a key that itself contains a dot cannot be
//! addressed with a path.

use crate::node::{Mapping, Node};

/// A parsed, non-empty dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    /// Split `raw` on `.`. Returns `None` for an empty path or one with an
    /// empty segment (`"a..b"`, `".a"`, `"a."`).
    pub fn parse(raw: &'a str) -> Option<Self> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    fn split_leaf(&self) -> Option<(&[&'a str], &'a str)> {
        let (leaf, parents) = self.segments.split_last()?;
        Some((parents, *leaf))
    }
}

/// Follow `path` from `root`. Stops with `None` as soon as a segment is
/// missing or the current node is not a mapping.
pub fn lookup<'m>(root: &'m Mapping, path: &KeyPath<'_>) -> Option<&'m Node> {
    let (parents, leaf) = path.split_leaf()?;
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_mapping()?;
    }
    current.get(leaf)
}

/// Mutable counterpart of [`lookup`].
pub fn lookup_mut<'m>(root: &'m mut Mapping, path: &KeyPath<'_>) -> Option<&'m mut Node> {
    let (parents, leaf) = path.split_leaf()?;
    let mut current = root;
    for segment in parents {
        current = current.get_mut(segment)?.as_mapping_mut()?;
    }
    current.get_mut(leaf)
}

/// Set (`Some`) or remove (`None`) the value at `path`.
///
/// Intermediate segments are created as empty mappings when missing. An
/// intermediate value that is not a mapping is replaced, discarding it.
/// Removing creates no intermediate mappings and is a no-op when any part
/// of the path is missing. Returns the node previously at `path`.
pub fn assign(root: &mut Mapping, path: &KeyPath<'_>, value: Option<Node>) -> Option<Node> {
    let (parents, leaf) = path.split_leaf()?;
    match value {
        Some(node) => {
            let mut current = root;
            for segment in parents {
                current = current.child_mapping(segment);
            }
            current.insert(leaf, node)
        }
        None => {
            let mut current = root;
            for segment in parents {
                current = current.get_mut(segment)?.as_mapping_mut()?;
            }
            current.remove(leaf)
        }
    }
}
