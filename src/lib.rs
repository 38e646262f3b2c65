//! Self-updating configuration files for Rust applications. Define a struct,
//! point at a file, and the file keeps itself in step with the struct.
//!
//! Confsync loads a TOML config file into a typed struct, writing the file
//! with defaults when it does not exist and rewriting it when new fields have
//! been added since it was last saved. Built on
//! [confique](https://docs.rs/confique) for struct-driven defaults and
//! template generation.
//!
//! ```ignore
//! let config: AppConfig = Confsync::builder()
//!     .app_name("myapp")
//!     .load()?;
//! ```
//!
//! That single call reads `myapp.toml` from the platform config directory,
//! creates it if missing, fills in `#[config(default)]` values, writes back
//! any fields the file was missing, and hands you a typed struct.
//!
//! # Design: struct as source of truth
//!
//! Your config struct (via confique's `Config` derive) is the schema:
//!
//! - **`#[config(default = ...)]`** provides the values written to a fresh
//!   file and the values filled in for keys a file leaves out.
//! - **`///` doc comments** become the comments in generated templates and the
//!   output of `config get`.
//! - **`#[config(nested)]`** models hierarchical config as TOML sections and
//!   dotted keys.
//! - **`Option<T>` fields** may be left out. Fields without `Option` and
//!   without a default must be present in the file or loading fails.
//!
//! Keys the struct does not declare are ignored when decoding and dropped the
//! next time the file is rewritten.
//!
//! # The load lifecycle
//!
//! ```text
//! file absent   →  defaults  →  write  →  Created
//! file present  →  parse → transform → prune obsolete keys → decode
//!               →  re-encode  →  differs from file?  →  write  →  Rewritten
//!                                                   else        →  Unchanged
//! ```
//!
//! Re-encoding a synced file reproduces it byte for byte, so a second load
//! writes nothing. Turn the rewrite off with
//! [`auto_update(false)`](ConfsyncBuilder::auto_update); a missing file is
//! still created.
//!
//! # Migrating old layouts
//!
//! A [`Transformer`] rewrites the parsed document before it is decoded. It
//! works on a [`Document`], a view over the generic [`Node`] tree addressed
//! by dotted paths:
//!
//! ```ignore
//! let config: AppConfig = Confsync::builder()
//!     .app_name("myapp")
//!     .transformer(|doc: &mut Document<'_>| {
//!         doc.migrate("server.listen_port", "port");
//!     })
//!     .load()?;
//! ```
//!
//! [`Migrations`] covers the common cases declaratively: renames, defaults
//! for keys that must exist before decoding, and keys that are obsolete and
//! should be deleted.
//!
//! Reading from a document is lenient. The typed getters
//! ([`get_int`](Document::get_int), [`get_bool`](Document::get_bool), ...)
//! and the [`Coerce`] trait behind them return a default or `None` when a
//! value is missing or has the wrong shape. They never fail: `"42"` coerces
//! to `42`, `"abc"` to the caller's default.
//!
//! Dotted paths have no escape syntax, so a key that itself contains a `.`
//! cannot be addressed.
//!
//! # Core library: no CLI framework required
//!
//! Loading, saving, the text functions ([`to_text`], [`from_text`],
//! [`update`]) and [`ConfigAction`] handling work without any CLI parser.
//! For [clap](https://docs.rs/clap) users, an optional adapter (the `cli`
//! module, behind the `clap` Cargo feature, on by default) provides
//! [`ConfigArgs`], which gives your app `config gen|list|get|set|unset|update`
//! subcommands. To use confsync without clap:
//!
//! ```toml
//! confsync = { version = "...", default-features = false }
//! ```
//!
//! # Editing from the command line
//!
//! - `config get` and `config list` show effective values and never write.
//! - `config set` checks that the key is a field of the struct and that the
//!   new document still decodes before anything is written.
//! - `config unset` removes a key so the default applies again.
//! - `config update` runs the load lifecycle with the rewrite forced on.
//!
//! # Concurrency
//!
//! Everything is synchronous. A [`Format`] is immutable and can be shared
//! freely. Two processes loading the same file at the same time are not
//! coordinated and may both write it.
//!
//! # Error handling
//!
//! All fallible operations return [`ConfsyncError`]. Coercion never errors.

pub mod codec;
pub mod coerce;
pub mod document;
pub mod error;
pub mod format;
pub mod node;
pub mod path;
pub mod transform;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod ops;
mod persist;
mod schema;

#[cfg(test)]
mod fixtures;

pub use builder::{Confsync, ConfsyncBuilder};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use coerce::{Coerce, Opaque, coerce, coerce_opt};
pub use document::Document;
pub use error::ConfsyncError;
pub use format::Format;
pub use node::{Mapping, Node, Scalar};
pub use ops::{ConfigResult, from_text, to_text, update};
pub use path::KeyPath;
pub use persist::{Loaded, WriteOutcome, load_from_path, save_to_path};
pub use transform::{Migrations, Transformer};
pub use types::{ConfigAction, Location};
