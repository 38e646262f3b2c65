//! Clap adapter for confsync.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`ConfigArgs`] embeds into your own clap `#[derive(Parser)]` struct and
//! gives it `config gen|list|get|set|unset|update` subcommands.
//!
//! The only bridge to the core is [`ConfigArgs::into_action()`], which
//! converts clap-parsed arguments into a [`ConfigAction`](crate::ConfigAction)
//! for [`ConfsyncBuilder::handle()`](crate::ConfsyncBuilder::handle). Callers
//! using another argument parser can build `ConfigAction` values directly.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show all effective configuration key-value pairs.
    List,
    /// Generate a commented sample configuration file.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the effective value and documentation for a config key.
    Get {
        /// Dotted key path (e.g. "database.url").
        key: String,
    },
    /// Persist a configuration value to the config file.
    Set {
        /// Dotted key path (e.g. "database.url").
        key: String,
        /// Value to set.
        value: String,
    },
    /// Remove a configuration value from the config file.
    Unset {
        /// Dotted key path (e.g. "database.url").
        key: String,
    },
    /// Rewrite the config file so it carries every current field.
    Update,
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Gen { output }) => ConfigAction::Gen { output },
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Set { key, value }) => ConfigAction::Set { key, value },
            Some(ConfigSubcommand::Unset { key }) => ConfigAction::Unset { key },
            Some(ConfigSubcommand::Update) => ConfigAction::Update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigAction {
        TestCli::try_parse_from(args).unwrap().config.into_action()
    }

    #[test]
    fn parse_gen_no_output() {
        assert_eq!(parse(&["test", "gen"]), ConfigAction::Gen { output: None });
    }

    #[test]
    fn parse_gen_with_output() {
        assert_eq!(
            parse(&["test", "gen", "-o", "out.toml"]),
            ConfigAction::Gen {
                output: Some(PathBuf::from("out.toml"))
            }
        );
    }

    #[test]
    fn parse_get() {
        assert_eq!(
            parse(&["test", "get", "database.url"]),
            ConfigAction::Get {
                key: "database.url".into()
            }
        );
    }

    #[test]
    fn parse_set_keeps_raw_value() {
        assert_eq!(
            parse(&["test", "set", "database.host", "0.0.0.0"]),
            ConfigAction::Set {
                key: "database.host".into(),
                value: "0.0.0.0".into(),
            }
        );
    }

    #[test]
    fn parse_unset() {
        assert_eq!(
            parse(&["test", "unset", "port"]),
            ConfigAction::Unset { key: "port".into() }
        );
    }

    #[test]
    fn parse_update() {
        assert_eq!(parse(&["test", "update"]), ConfigAction::Update);
    }

    #[test]
    fn parse_bare_config_is_list() {
        assert_eq!(parse(&["test"]), ConfigAction::List);
        assert_eq!(parse(&["test", "list"]), ConfigAction::List);
    }

    #[test]
    fn invalid_subcommand_errors() {
        assert!(TestCli::try_parse_from(["test", "nope"]).is_err());
    }

    #[test]
    fn set_requires_value() {
        assert!(TestCli::try_parse_from(["test", "set", "port"]).is_err());
    }
}
