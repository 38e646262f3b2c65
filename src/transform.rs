//! Transformers: caller-supplied migrations applied to the generic document
//! before it is decoded into the typed config.
//!
//! The pipeline is linear:
//!
//! 1. Parse the text into a generic tree
//! 2. Use the root mapping (any other root shape becomes an empty mapping)
//! 3. Call [`Transformer::transform`] once
//! 4. Remove every path in [`Transformer::obsolete_keys`]
//! 5. Emit the tree back to text
//!
//! Decoding the emitted text into the config type is the caller's step.

use crate::document::Document;
use crate::error::ConfsyncError;
use crate::format::Format;
use crate::node::{Mapping, Node};

/// Rewrites a parsed document, typically to migrate an older config layout.
///
/// Closures taking `&mut Document` implement this trait, so simple
/// migrations need no type of their own.
pub trait Transformer {
    fn transform(&self, doc: &mut Document<'_>);

    /// Dotted paths to remove after [`transform`](Self::transform) runs.
    fn obsolete_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<F> Transformer for F
where
    F: Fn(&mut Document<'_>),
{
    fn transform(&self, doc: &mut Document<'_>) {
        self(doc)
    }
}

/// Run the transform steps over `text` and return the migrated text.
pub fn apply(
    text: &str,
    transformer: &dyn Transformer,
    format: &Format,
) -> Result<String, ConfsyncError> {
    let mut root = format.parse(text)?.into_mapping();
    run(&mut root, transformer);
    format.emit(&root)
}

/// Transform `root` in place, then remove the obsolete keys.
pub fn run(root: &mut Mapping, transformer: &dyn Transformer) {
    let mut doc = Document::new(root);
    transformer.transform(&mut doc);

    for key in transformer.obsolete_keys() {
        if doc.remove(&key).is_some() {
            tracing::debug!(key = %key, "removed obsolete key");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Rename { from: String, to: String },
    Default { path: String, value: Node },
}

/// A declarative [`Transformer`]: renames and default values applied in the order
/// they were declared, plus a list of obsolete paths.
///
/// ```ignore
/// let migrations = Migrations::new()
///     .rename("old_type", "type")
///     .rename("nested.old_value", "nested.value")
///     .set_default("nested.mode", "fast")
///     .obsolete("legacy");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Migrations {
    steps: Vec<Step>,
    obsolete: Vec<String>,
}

impl Migrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the value at `from` to `to`, if present.
    pub fn rename(mut self, from: &str, to: &str) -> Self {
        self.steps.push(Step::Rename {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    /// Set `path` to `value` unless something is already there.
    pub fn set_default(mut self, path: &str, value: impl Into<Node>) -> Self {
        self.steps.push(Step::Default {
            path: path.to_string(),
            value: value.into(),
        });
        self
    }

    /// Remove `path` after all steps have run.
    pub fn obsolete(mut self, path: &str) -> Self {
        self.obsolete.push(path.to_string());
        self
    }
}

impl Transformer for Migrations {
    fn transform(&self, doc: &mut Document<'_>) {
        for step in &self.steps {
            match step {
                Step::Rename { from, to } => {
                    if doc.migrate(from, to) {
                        tracing::debug!(from = %from, to = %to, "migrated key");
                    }
                }
                Step::Default { path, value } => {
                    if !doc.contains(path) {
                        doc.set(path, value.clone());
                    }
                }
            }
        }
    }

    fn obsolete_keys(&self) -> Vec<String> {
        self.obsolete.clone()
    }
}
