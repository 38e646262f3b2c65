//! Typed decoding: turn a document into a config struct.
//!
//! The document is deserialized into `C::Layer` (confique's all-optional
//! mirror of `C`), then confique fills in `#[config(default)]` values and
//! checks that every required field is present. Keys the layer does not know
//! are ignored.

use confique::Config;
use serde::Deserialize;
use toml::{Table, Value};

use crate::error::ConfsyncError;
use crate::node::Mapping;

/// Decode TOML text into `C`.
pub fn decode<C: Config>(text: &str) -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let table: Table = toml::from_str(text).map_err(ConfsyncError::ParseError)?;
    decode_table(table)
}

/// Decode an already-parsed mapping into `C`.
pub fn decode_mapping<C: Config>(root: Mapping) -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    decode_table(Table::from(root))
}

/// The all-defaults instance of `C`: an empty document, decoded.
pub fn defaults<C: Config>() -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    decode_table(Table::new())
}

fn decode_table<C: Config>(table: Table) -> Result<C, ConfsyncError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let layer: C::Layer = Value::Table(table)
        .try_into()
        .map_err(ConfsyncError::DecodeError)?;

    C::builder()
        .preloaded(layer)
        .load()
        .map_err(ConfsyncError::from)
}
