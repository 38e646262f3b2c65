use std::path::PathBuf;

/// The directory a config file lives in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Location {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    #[default]
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Gen { output: Option<PathBuf> },
    List,
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
    Update,
}
