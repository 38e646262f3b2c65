//! Path-addressed access to a parsed document, as seen by transformers.

use serde::de::DeserializeOwned;

use crate::coerce::{Coerce, Opaque};
use crate::node::{Mapping, Node};
use crate::path::{self, KeyPath};

/// A mutable view of a mapping, addressed with dotted paths.
///
/// A `Document` borrows the mapping it edits; it never owns a copy. Sections
/// returned by [`section`](Self::section) borrow the nested mapping from
/// their parent, so edits made through a section are edits to the parent
/// document, and the parent is unusable until the section is dropped.
///
/// ```ignore
/// let mut root = Mapping::new();
/// let mut doc = Document::new(&mut root);
/// doc.set("database.host", "localhost");
/// doc.migrate("database.host", "db.host");
/// assert_eq!(doc.get_string("db.host", ""), "localhost");
/// ```
#[derive(Debug)]
pub struct Document<'a> {
    root: &'a mut Mapping,
}

impl<'a> Document<'a> {
    pub fn new(root: &'a mut Mapping) -> Self {
        Self { root }
    }

    /// The underlying mapping, for operations paths cannot express.
    pub fn as_mapping(&self) -> &Mapping {
        &*self.root
    }

    pub fn as_mapping_mut(&mut self) -> &mut Mapping {
        &mut *self.root
    }

    /// The node at `path`, or `None` if any segment is missing or walks
    /// through something that is not a mapping.
    pub fn get(&self, path: &str) -> Option<&Node> {
        path::lookup(&*self.root, &KeyPath::parse(path)?)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        path::lookup_mut(&mut *self.root, &KeyPath::parse(path)?)
    }

    /// Set `path` to `value`, creating intermediate mappings as needed.
    ///
    /// Non-mapping values found along the way are replaced by mappings. An
    /// existing key keeps its position; a new key goes last.
    pub fn set(&mut self, path: &str, value: impl Into<Node>) {
        self.assign(path, Some(value.into()));
    }

    /// Set (`Some`) or remove (`None`) the value at `path`, returning the
    /// node that was there before.
    pub fn assign(&mut self, path: &str, value: Option<Node>) -> Option<Node> {
        let key_path = KeyPath::parse(path)?;
        path::assign(&mut *self.root, &key_path, value)
    }

    /// Remove the value at `path`. Missing paths are a no-op.
    pub fn remove(&mut self, path: &str) -> Option<Node> {
        self.assign(path, None)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Move the value at `old_path` to `new_path`.
    ///
    /// Does nothing if `old_path` is absent; in particular `new_path` is not
    /// created. Returns whether a value was moved.
    pub fn migrate(&mut self, old_path: &str, new_path: &str) -> bool {
        let Some(value) = self.get(old_path).cloned() else {
            return false;
        };
        self.set(new_path, value);
        self.remove(old_path);
        true
    }

    /// A view of the mapping at `path`, or `None` if it is absent or not a
    /// mapping. The section shares storage with this document.
    pub fn section(&mut self, path: &str) -> Option<Document<'_>> {
        let root = self.get_mut(path)?.as_mapping_mut()?;
        Some(Document { root })
    }

    // --- typed getters ---

    /// The value at `path` coerced to `T`, or `default` if it is absent or
    /// cannot be coerced.
    pub fn get_or<T: Coerce>(&self, path: &str, default: T) -> T {
        self.get(path)
            .and_then(T::coerce)
            .unwrap_or(default)
    }

    /// The value at `path` coerced to `T`, or `None`.
    pub fn get_opt<T: Coerce>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(T::coerce)
    }

    /// The value at `path` deserialized into `T`, or `None`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.get_opt::<Opaque<T>>(path).map(|Opaque(v)| v)
    }

    pub fn get_string(&self, path: &str, default: &str) -> String {
        self.get_opt(path).unwrap_or_else(|| default.to_string())
    }

    pub fn get_int(&self, path: &str, default: i32) -> i32 {
        self.get_or(path, default)
    }

    pub fn get_long(&self, path: &str, default: i64) -> i64 {
        self.get_or(path, default)
    }

    pub fn get_float(&self, path: &str, default: f32) -> f32 {
        self.get_or(path, default)
    }

    pub fn get_double(&self, path: &str, default: f64) -> f64 {
        self.get_or(path, default)
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.get_or(path, default)
    }

    pub fn get_list(&self, path: &str) -> Option<&[Node]> {
        self.get(path)?.as_sequence()
    }

    pub fn get_map(&self, path: &str) -> Option<&Mapping> {
        self.get(path)?.as_mapping()
    }
}
