//! # confsync demo application
//!
//! A sample CLI tool showing how an application wires confsync in. It keeps
//! its config in `confsync-demo.toml` in the current directory.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example confsync_demo -- show
//! cargo run --example confsync_demo -- config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature             | How to exercise it                                                   |
//! |---------------------|----------------------------------------------------------------------|
//! | File created        | Delete `confsync-demo.toml`, then run `show`                         |
//! | Missing fields      | Trim the file to one line, run `show`, look at the file again        |
//! | Legacy migration    | Write `listen_port = 9000` into the file, then run `show`            |
//! | `config gen`        | `cargo run --example confsync_demo -- config gen`                    |
//! | `config set`        | `cargo run --example confsync_demo -- config set server.port 8081`   |
//! | `config update`     | `cargo run --example confsync_demo -- config update`                 |

use clap::{Parser, Subcommand};
use confique::Config;
use serde::{Deserialize, Serialize};

use confsync::{ConfigArgs, Confsync, ConfsyncBuilder, Location, Migrations};

#[derive(Config, Serialize, Deserialize, Debug)]
struct DemoConfig {
    /// Greeting printed by `show`.
    #[config(default = "hello")]
    greeting: String,

    /// Server settings.
    #[config(nested)]
    server: ServerConfig,
}

#[derive(Config, Serialize, Deserialize, Debug)]
struct ServerConfig {
    /// Interface to bind.
    #[config(default = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[config(default = 8080)]
    port: u16,
}

/// confsync demo: a sample CLI app for showcasing confsync integration.
#[derive(Parser, Debug)]
#[command(name = "confsync-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the config and print it.
    Show,
    /// Manage the configuration file.
    Config(ConfigArgs),
}

fn builder() -> ConfsyncBuilder<DemoConfig> {
    Confsync::builder::<DemoConfig>()
        .app_name("confsync-demo")
        .location(Location::Cwd)
        .transformer(
            Migrations::new()
                .rename("listen_port", "server.port")
                .obsolete("legacy_mode"),
        )
}

fn main() -> Result<(), confsync::ConfsyncError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => {
            let loaded = builder().sync()?;
            println!("({:?})", loaded.outcome);
            let config = loaded.config;
            println!(
                "{} from {}:{}",
                config.greeting, config.server.host, config.server.port
            );
        }
        Commands::Config(args) => builder().handle_and_print(&args.into_action())?,
    }
    Ok(())
}
