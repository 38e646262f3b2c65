//! Parser and emitter settings for the TOML text format.
//!
//! A [`Format`] is plain immutable data. Build one at startup (or use
//! [`Format::DEFAULT`]) and pass it by reference to every call; nothing
//! mutates it afterwards, so it can be shared freely across threads.

use serde::Serialize;

use crate::error::ConfsyncError;
use crate::node::{Mapping, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pretty: bool,
}

impl Format {
    /// Compact arrays, keys in document order.
    pub const DEFAULT: Format = Format { pretty: false };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Emit arrays one element per line.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Parse TOML text into a generic tree.
    pub fn parse(&self, text: &str) -> Result<Node, ConfsyncError> {
        let table: toml::Table = toml::from_str(text).map_err(ConfsyncError::ParseError)?;
        Ok(Node::Mapping(Mapping::from(table)))
    }

    /// Emit a mapping as TOML text, keys in insertion order.
    pub fn emit(&self, root: &Mapping) -> Result<String, ConfsyncError> {
        self.encode(&toml::Table::from(root.clone()))
    }

    /// Serialize any value (typically a config struct) as TOML text.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ConfsyncError> {
        let text = if self.pretty {
            toml::to_string_pretty(value)?
        } else {
            toml::to_string(value)?
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_produces_mapping_root() {
        let node = Format::DEFAULT.parse("port = 8080\n").unwrap();
        let root = node.as_mapping().unwrap();
        assert_eq!(root.get("port"), Some(&Node::from(8080)));
    }

    #[test]
    fn empty_text_is_empty_mapping() {
        let node = Format::DEFAULT.parse("").unwrap();
        assert!(node.into_mapping().is_empty());
    }

    #[test]
    fn malformed_text_is_parse_error() {
        let err = Format::DEFAULT.parse("port = = 1").unwrap_err();
        assert!(matches!(err, ConfsyncError::ParseError(_)));
    }

    #[test]
    fn emit_keeps_insertion_order() {
        let root: Mapping = [("zeta", 1), ("alpha", 2)].into_iter().collect();
        let text = Format::DEFAULT.emit(&root).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn parse_emit_round_trip() {
        let format = Format::DEFAULT;
        let text = "name = \"app\"\nports = [80, 443]\n\n[database]\nhost = \"localhost\"\n";
        let root = format.parse(text).unwrap().into_mapping();
        let emitted = format.emit(&root).unwrap();
        assert_eq!(format.parse(&emitted).unwrap().into_mapping(), root);
    }

    #[test]
    fn pretty_is_opt_in() {
        assert!(!Format::new().is_pretty());
        assert!(Format::new().pretty(true).is_pretty());
    }

    #[test]
    fn pretty_spreads_arrays() {
        let root: Mapping = [(
            "ports",
            Node::Sequence(vec![Node::from(80), Node::from(443)]),
        )]
        .into_iter()
        .collect();
        let compact = Format::DEFAULT.emit(&root).unwrap();
        let pretty = Format::new().pretty(true).emit(&root).unwrap();
        assert_eq!(compact.lines().count(), 1);
        assert!(pretty.lines().count() > 1);
    }
}
