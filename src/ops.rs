//! Text-level operations and the result type for config actions.
//!
//! `to_text`, `from_text` and `update` are pure functions over strings; they
//! do no I/O. The lookup helpers behind `config get` and `config list` also
//! live here.

use std::fmt;
use std::path::PathBuf;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ConfsyncError;
use crate::format::Format;
use crate::node::{Mapping, Node};
use crate::path::{self, KeyPath};
use crate::persist::WriteOutcome;
use crate::schema;
use crate::transform::{self, Transformer};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated TOML template string.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// A key's effective value and its doc comment.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// Confirmation that a value was persisted.
    ValueSet { key: String, value: String },
    /// Confirmation that a value was removed.
    ValueUnset { key: String },
    /// All effective configuration key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// Outcome of syncing a config file with the schema.
    Updated { path: PathBuf, outcome: WriteOutcome },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Config template written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ConfigResult::ValueUnset { key } => write!(f, "Unset {key}"),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Updated { path, outcome } => match outcome {
                WriteOutcome::Created => write!(f, "Created {}", path.display()),
                WriteOutcome::Rewritten => write!(f, "Updated {}", path.display()),
                WriteOutcome::Unchanged => write!(f, "{} is up to date", path.display()),
            },
        }
    }
}

/// Serialize a config instance to TOML text.
pub fn to_text<C: Serialize>(instance: &C, format: &Format) -> Result<String, ConfsyncError> {
    format.encode(instance)
}

/// Decode TOML text into `C`, running `transformer` over the document first.
///
/// Without a transformer the text is decoded as-is.
pub fn from_text<C: Config>(
    text: &str,
    transformer: Option<&dyn Transformer>,
    format: &Format,
) -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    match transformer {
        Some(t) => {
            let migrated = transform::apply(text, t, format)?;
            codec::decode(&migrated)
        }
        None => codec::decode(text),
    }
}

/// Decode and re-encode `text`, so that it carries every field of `C` with
/// defaults filled in and transformer migrations applied.
pub fn update<C: Config + Serialize>(
    text: &str,
    transformer: Option<&dyn Transformer>,
    format: &Format,
) -> Result<String, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let instance: C = from_text(text, transformer, format)?;
    to_text(&instance, format)
}

/// Generate a commented TOML template from the config struct's doc comments.
pub fn generate_template<C: Config>() -> String {
    confique::toml::template::<C>(confique::toml::FormatOptions::default())
}

/// The config instance as a generic tree.
fn to_mapping<C: Serialize>(config: &C) -> Result<Mapping, ConfsyncError> {
    let value = toml::Value::try_from(config)?;
    Ok(Node::from(value).into_mapping())
}

/// Get a config value by dotted key, including its doc comment.
pub fn get_value<C: Config + Serialize>(
    config: &C,
    key: &str,
) -> Result<ConfigResult, ConfsyncError> {
    let root = to_mapping(config)?;
    let node = KeyPath::parse(key)
        .and_then(|p| path::lookup(&root, &p))
        .ok_or_else(|| ConfsyncError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: node.display(),
        doc: schema::lookup_doc(&C::META, key),
    })
}

/// List all config values as flattened dotted key-value pairs.
///
/// Optional fields that are unset show as `<not set>`.
pub fn list_values<C: Config + Serialize>(config: &C) -> Result<ConfigResult, ConfsyncError> {
    let root = to_mapping(config)?;
    let mut entries = Vec::new();
    flatten_into(&root, "", &mut entries);

    for key in schema::leaf_keys(&C::META) {
        if !entries.iter().any(|(k, _)| *k == key) {
            entries.push((key, "<not set>".to_string()));
        }
    }

    Ok(ConfigResult::Listing { entries })
}

fn flatten_into(map: &Mapping, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, node) in map.iter() {
        let dotted = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            Node::Mapping(inner) => flatten_into(inner, &dotted, out),
            other => out.push((dotted, other.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::fixtures::test::{AppConfig, LegacyConfig};
    use crate::transform::Migrations;

    const FORMAT: Format = Format::DEFAULT;

    fn test_config() -> AppConfig {
        AppConfig::builder().load().unwrap()
    }

    #[test]
    fn to_text_contains_all_fields() {
        let text = to_text(&test_config(), &FORMAT).unwrap();
        assert!(text.contains("name = \"MyApp\""));
        assert!(text.contains("port = 8080"));
        assert!(text.contains("[database]"));
        assert!(text.contains("pool_size = 5"));
        assert!(!text.contains("url"));
    }

    #[test]
    fn from_text_without_transformer_decodes_directly() {
        let config: AppConfig = from_text("name = \"Other\"\n", None, &FORMAT).unwrap();
        assert_eq!(config.name, "Other");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn noop_transformer_is_pass_through() {
        let text = to_text(&test_config(), &FORMAT).unwrap();
        let noop = |_: &mut Document<'_>| {};
        let with: AppConfig = from_text(&text, Some(&noop), &FORMAT).unwrap();
        let without: AppConfig = codec::decode(&text).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn transformer_rewrites_value() {
        let rename_old = |doc: &mut Document<'_>| {
            if doc.get_string("kind", "") == "old" {
                doc.set("kind", "new");
            }
        };
        let config: LegacyConfig = from_text("kind = \"old\"\n", Some(&rename_old), &FORMAT).unwrap();
        assert_eq!(config.kind, "new");
    }

    #[test]
    fn migration_with_obsolete_key() {
        let text = "old_kind = \"migrated\"\n\n[nested]\nold_value = 99\n";
        let migrations = Migrations::new()
            .rename("old_kind", "kind")
            .rename("nested.old_value", "nested.value")
            .obsolete("old_kind");

        let config: LegacyConfig = from_text(text, Some(&migrations), &FORMAT).unwrap();
        assert_eq!(config.kind, "migrated");
        assert_eq!(config.nested.value, 99);

        let updated = update::<LegacyConfig>(text, Some(&migrations), &FORMAT).unwrap();
        assert!(!updated.contains("old_kind"));
        assert!(updated.contains("kind = \"migrated\""));
        assert!(updated.contains("value = 99"));
    }

    #[test]
    fn update_fills_missing_fields() {
        let updated = update::<AppConfig>("name = \"MinimalApp\"\n", None, &FORMAT).unwrap();
        assert!(updated.contains("name = \"MinimalApp\""));
        assert!(updated.contains("version = \"1.0.0\""));
        assert!(updated.contains("port = 8080"));
    }

    #[test]
    fn update_is_idempotent() {
        let once = update::<AppConfig>("port = 3000\n[database]\nurl = \"pg://\"\n", None, &FORMAT)
            .unwrap();
        let twice = update::<AppConfig>(&once, None, &FORMAT).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_propagates_parse_error() {
        let result = update::<AppConfig>("port = ", None, &FORMAT);
        assert!(matches!(result, Err(ConfsyncError::ParseError(_))));
    }

    #[test]
    fn generate_template_contains_keys_and_docs() {
        let template = generate_template::<AppConfig>();
        assert!(template.contains("port"));
        assert!(template.contains("pool_size"));
        assert!(template.contains("The port number."));
    }

    #[test]
    fn get_top_level_value() {
        let result = get_value(&test_config(), "port").unwrap();
        match result {
            ConfigResult::KeyValue { key, value, doc } => {
                assert_eq!(key, "port");
                assert_eq!(value, "8080");
                assert_eq!(doc, vec!["The port number."]);
            }
            other => panic!("Expected KeyValue, got {other:?}"),
        }
    }

    #[test]
    fn get_nested_value() {
        let result = get_value(&test_config(), "database.pool_size").unwrap();
        match result {
            ConfigResult::KeyValue { value, doc, .. } => {
                assert_eq!(value, "5");
                assert_eq!(doc, vec!["Connection pool size."]);
            }
            other => panic!("Expected KeyValue, got {other:?}"),
        }
    }

    #[test]
    fn get_unknown_key_errors() {
        let result = get_value(&test_config(), "nonexistent");
        assert!(matches!(result, Err(ConfsyncError::KeyNotFound(_))));
        // unset optionals are not present in the encoded document
        let result = get_value(&test_config(), "database.url");
        assert!(matches!(result, Err(ConfsyncError::KeyNotFound(_))));
    }

    #[test]
    fn list_includes_nested_and_unset() {
        let ConfigResult::Listing { entries } = list_values(&test_config()).unwrap() else {
            panic!("Expected Listing");
        };
        let find = |k: &str| entries.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());
        assert_eq!(find("name").as_deref(), Some("MyApp"));
        assert_eq!(find("database.pool_size").as_deref(), Some("5"));
        assert_eq!(find("database.url").as_deref(), Some("<not set>"));
    }

    #[test]
    fn display_listing_one_per_line() {
        let result = ConfigResult::Listing {
            entries: vec![("a".into(), "1".into()), ("b.c".into(), "x".into())],
        };
        assert_eq!(result.to_string(), "a = 1\nb.c = x");
    }

    #[test]
    fn display_key_value_with_doc() {
        let result = ConfigResult::KeyValue {
            key: "port".into(),
            value: "8080".into(),
            doc: vec!["The port number.".into()],
        };
        assert_eq!(result.to_string(), "# The port number.\nport = 8080");
    }

    #[test]
    fn display_update_outcomes() {
        let result = ConfigResult::Updated {
            path: "app.toml".into(),
            outcome: WriteOutcome::Unchanged,
        };
        assert_eq!(result.to_string(), "app.toml is up to date");
    }
}
