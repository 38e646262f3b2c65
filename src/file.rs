//! Resolving where a config file lives.
//!
//! A [`Location`] names a directory; the file name (by default
//! `{app_name}.toml`) is joined onto it. Resolution can fail only for the
//! platform and home variants, when the OS reports no such directory.

use std::path::PathBuf;

use crate::error::ConfsyncError;
use crate::types::Location;

/// Resolve a [`Location`] to a concrete directory.
///
/// `app_name` is used by `Location::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_location(location: &Location, app_name: &str) -> Option<PathBuf> {
    match location {
        Location::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        Location::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        Location::Cwd => std::env::current_dir().ok(),
        Location::Path(p) => Some(p.clone()),
    }
}

/// Resolve the full config file path for `location`.
pub fn resolve_file_path(
    location: &Location,
    file_name: &str,
    app_name: &str,
) -> Result<PathBuf, ConfsyncError> {
    let dir = resolve_location(location, app_name)
        .ok_or_else(|| ConfsyncError::UnresolvedLocation(format!("{location:?}")))?;
    Ok(dir.join(file_name))
}
