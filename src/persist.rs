//! Config files on disk: load with auto-update, save, and single-key edits.
//!
//! Loading follows a small state machine:
//!
//! - **File absent**: build the all-defaults instance, write it out, return it.
//! - **File present**: decode through the transform pipeline. With
//!   auto-update on, re-encode the instance and write it back only if the
//!   text differs from what was read, so a second load of a synced file
//!   writes nothing.
//!
//! Writes are not coordinated between processes. Two loads of the same file
//! racing each other may both write.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::document::Document;
use crate::error::ConfsyncError;
use crate::format::Format;
use crate::node::{Node, Scalar};
use crate::ops::{self, ConfigResult};
use crate::schema;
use crate::transform::{self, Transformer};

/// What a load did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was created with defaults.
    Created,
    /// The file existed and was rewritten to match the schema.
    Rewritten,
    /// Nothing was written.
    Unchanged,
}

/// A loaded config together with what happened to its file.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<C> {
    pub config: C,
    pub outcome: WriteOutcome,
}

/// Read a file, returning `None` if it does not exist.
fn read_optional(path: &Path) -> Result<Option<String>, ConfsyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfsyncError::io(path, e)),
    }
}

/// Write `content` to `path`, creating parent directories as needed.
fn write_text(path: &Path, content: &str) -> Result<(), ConfsyncError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfsyncError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ConfsyncError::io(path, e))
}

/// Load `C` from `path`, creating or updating the file as described in the
/// module docs.
pub fn load_from_path<C: Config + Serialize>(
    path: &Path,
    transformer: Option<&dyn Transformer>,
    auto_update: bool,
    format: &Format,
) -> Result<Loaded<C>, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let Some(content) = read_optional(path)? else {
        let config: C = codec::defaults()?;
        save_to_path(&config, path, format)?;
        tracing::info!(path = %path.display(), "created config file with defaults");
        return Ok(Loaded {
            config,
            outcome: WriteOutcome::Created,
        });
    };

    let config: C = ops::from_text(&content, transformer, format)?;

    if !auto_update {
        return Ok(Loaded {
            config,
            outcome: WriteOutcome::Unchanged,
        });
    }

    let updated = ops::to_text(&config, format)?;
    if updated == content {
        tracing::debug!(path = %path.display(), "config file already in sync");
        return Ok(Loaded {
            config,
            outcome: WriteOutcome::Unchanged,
        });
    }

    write_text(path, &updated)?;
    tracing::info!(path = %path.display(), "rewrote config file to match schema");
    Ok(Loaded {
        config,
        outcome: WriteOutcome::Rewritten,
    })
}

/// Load `C` from `path` without ever writing. An absent file yields defaults.
pub fn read_config<C: Config>(
    path: &Path,
    transformer: Option<&dyn Transformer>,
    format: &Format,
) -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    match read_optional(path)? {
        Some(content) => ops::from_text(&content, transformer, format),
        None => codec::defaults(),
    }
}

/// Encode `instance` and write it to `path`, replacing any previous content.
/// Creates parent directories if needed.
pub fn save_to_path<C: Serialize>(
    instance: &C,
    path: &Path,
    format: &Format,
) -> Result<(), ConfsyncError> {
    let text = ops::to_text(instance, format)?;
    write_text(path, &text)
}

/// Pure function: set `key` to `raw_value` in a document string.
///
/// The key must be a leaf field of `C`. The raw value's type is inferred
/// (see [`Scalar::infer`]); if the field rejects the inferred type, the raw
/// text is tried as a string, so `version = 2.0` works for a string field.
/// The edited document must decode as `C`, so a string where a number is
/// expected is rejected before anything is written.
///
/// `transformer` runs before the edit, so a file in an older layout is
/// migrated and written back in the current one.
pub fn set_in_document<C: Config>(
    content: &str,
    key: &str,
    raw_value: &str,
    transformer: Option<&dyn Transformer>,
    format: &Format,
) -> Result<String, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    if !schema::is_leaf_key(&C::META, key) {
        return Err(ConfsyncError::KeyNotFound(key.into()));
    }

    let mut parsed = format.parse(content)?.into_mapping();
    if let Some(t) = transformer {
        transform::run(&mut parsed, t);
    }
    let inferred = Scalar::infer(raw_value);
    let mut candidates = vec![inferred.clone()];
    if !matches!(inferred, Scalar::String(_)) {
        candidates.push(Scalar::String(raw_value.to_string()));
    }

    let mut first_error = None;
    for scalar in candidates {
        let mut root = parsed.clone();
        Document::new(&mut root).set(key, Node::Scalar(scalar));
        match codec::decode_mapping::<C>(root.clone()) {
            Ok(_) => return format.emit(&root),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    Err(ConfsyncError::InvalidValue {
        key: key.into(),
        reason: first_error.map(|e| e.to_string()).unwrap_or_default(),
    })
}

/// Pure function: remove `key` from a document string. Absent keys are a no-op.
pub fn unset_in_document(content: &str, key: &str, format: &Format) -> Result<String, ConfsyncError> {
    let mut root = format.parse(content)?.into_mapping();
    Document::new(&mut root).remove(key);
    format.emit(&root)
}

/// I/O wrapper around [`set_in_document`]. A missing file starts from the
/// all-defaults document.
pub fn persist_value<C: Config + Serialize>(
    path: &Path,
    key: &str,
    value: &str,
    transformer: Option<&dyn Transformer>,
    format: &Format,
) -> Result<ConfigResult, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let content = match read_optional(path)? {
        Some(c) => c,
        None => ops::to_text(&codec::defaults::<C>()?, format)?,
    };

    let new_content = set_in_document::<C>(&content, key, value, transformer, format)?;
    write_text(path, &new_content)?;
    tracing::debug!(path = %path.display(), key, value, "persisted config value");

    Ok(ConfigResult::ValueSet {
        key: key.into(),
        value: value.into(),
    })
}

/// I/O wrapper around [`unset_in_document`]. A missing file is left missing.
pub fn unset_value(path: &Path, key: &str, format: &Format) -> Result<ConfigResult, ConfsyncError> {
    if let Some(content) = read_optional(path)? {
        let new_content = unset_in_document(&content, key, format)?;
        if new_content != content {
            write_text(path, &new_content)?;
        }
    }
    Ok(ConfigResult::ValueUnset { key: key.into() })
}
