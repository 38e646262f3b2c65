use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::ConfsyncError;
use crate::file;
use crate::format::Format;
use crate::ops::{self, ConfigResult};
use crate::persist::{self, Loaded};
use crate::transform::Transformer;
use crate::types::{ConfigAction, Location};

/// Entry point for building a confsync configuration.
pub struct Confsync;

impl Confsync {
    pub fn builder<C: Config>() -> ConfsyncBuilder<C> {
        ConfsyncBuilder::new()
    }
}

/// Builder for loading, syncing and editing one config file.
///
/// The file is either given directly with [`path()`](Self::path), or derived
/// from [`app_name()`](Self::app_name), [`file_name()`](Self::file_name) and
/// [`location()`](Self::location).
pub struct ConfsyncBuilder<C: Config> {
    app_name: Option<String>,
    file_name: Option<String>,
    location: Location,
    path: Option<PathBuf>,
    format: Format,
    transformer: Option<Box<dyn Transformer>>,
    auto_update: bool,
    _phantom: PhantomData<C>,
}

impl<C: Config> ConfsyncBuilder<C> {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            location: Location::default(),
            path: None,
            format: Format::DEFAULT,
            transformer: None,
            auto_update: true,
            _phantom: PhantomData,
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.toml"`
    /// - `location` → [`Location::Platform`], i.e. `~/.config/{app_name}/` on Linux
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the config file name (default: `"{app_name}.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Set the directory the config file lives in (default: [`Location::Platform`]).
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Use this exact file. Takes precedence over `app_name`, `file_name` and
    /// `location`.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Migrate documents with `transformer` before decoding them.
    pub fn transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    /// Rewrite an existing file when it no longer matches the schema
    /// (default: `true`). A missing file is always created.
    pub fn auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }

    /// Resolve the effective file name.
    fn effective_file_name(&self) -> Result<String, ConfsyncError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self.app_name.as_deref().ok_or(ConfsyncError::PathRequired)?;
        Ok(format!("{app}.toml"))
    }

    /// Resolve the config file path from the builder state.
    fn effective_path(&self) -> Result<PathBuf, ConfsyncError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let app_name = self.app_name.as_deref().ok_or(ConfsyncError::PathRequired)?;
        let file_name = self.effective_file_name()?;
        file::resolve_file_path(&self.location, &file_name, app_name)
    }

    fn transformer_ref(&self) -> Option<&dyn Transformer> {
        self.transformer.as_deref()
    }

    /// Load the config, creating the file with defaults if it is missing and
    /// rewriting it if auto-update is on and it is out of date.
    pub fn load(self) -> Result<C, ConfsyncError>
    where
        C: Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        self.sync().map(|loaded| loaded.config)
    }

    /// Like [`load()`](Self::load), but also reports what was written.
    pub fn sync(self) -> Result<Loaded<C>, ConfsyncError>
    where
        C: Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        let path = self.effective_path()?;
        persist::load_from_path(&path, self.transformer_ref(), self.auto_update, &self.format)
    }

    /// Write `config` to the file, replacing whatever is there.
    pub fn save(&self, config: &C) -> Result<(), ConfsyncError>
    where
        C: Serialize,
    {
        let path = self.effective_path()?;
        persist::save_to_path(config, &path, &self.format)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), ConfsyncError>
    where
        C: Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (gen / list / get / set / unset / update).
    ///
    /// `list` and `get` never write. `update` runs the load lifecycle with
    /// auto-update forced on.
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, ConfsyncError>
    where
        C: Serialize,
        C::Layer: for<'de> Deserialize<'de>,
    {
        match action {
            ConfigAction::Gen { output } => {
                let template = ops::generate_template::<C>();
                match output {
                    Some(path) => {
                        write_template(path, &template)?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
            ConfigAction::List => {
                let path = self.effective_path()?;
                let config: C = persist::read_config(&path, self.transformer_ref(), &self.format)?;
                ops::list_values(&config)
            }
            ConfigAction::Get { key } => {
                let path = self.effective_path()?;
                let config: C = persist::read_config(&path, self.transformer_ref(), &self.format)?;
                ops::get_value(&config, key)
            }
            ConfigAction::Set { key, value } => {
                let path = self.effective_path()?;
                persist::persist_value::<C>(&path, key, value, self.transformer_ref(), &self.format)
            }
            ConfigAction::Unset { key } => {
                let path = self.effective_path()?;
                persist::unset_value(&path, key, &self.format)
            }
            ConfigAction::Update => {
                let path = self.effective_path()?;
                let loaded: Loaded<C> =
                    persist::load_from_path(&path, self.transformer_ref(), true, &self.format)?;
                Ok(ConfigResult::Updated {
                    path,
                    outcome: loaded.outcome,
                })
            }
        }
    }
}

fn write_template(path: &Path, template: &str) -> Result<(), ConfsyncError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfsyncError::io(parent, e))?;
    }
    std::fs::write(path, template).map_err(|e| ConfsyncError::io(path, e))
}
