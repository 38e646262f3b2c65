#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct AppConfig {
        /// Display name of the application.
        #[config(default = "MyApp")]
        pub name: String,

        /// Config schema version.
        #[config(default = "1.0.0")]
        pub version: String,

        /// The port number.
        #[config(default = 8080)]
        pub port: u16,

        /// Enable debug mode.
        #[config(default = false)]
        pub debug: bool,

        /// Database settings.
        #[config(nested)]
        pub database: DbConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct DbConfig {
        /// Database host.
        #[config(default = "localhost")]
        pub host: String,

        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 5)]
        pub pool_size: usize,
    }

    #[test]
    fn app_config_loads_defaults() {
        let config = AppConfig::builder().load().unwrap();
        assert_eq!(config.name, "MyApp");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.url, None);
    }

    // -- Fixture for migration tests --------------------------------------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct LegacyConfig {
        /// Kind of deployment.
        #[config(default = "default")]
        pub kind: String,

        #[config(nested)]
        pub nested: NestedConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct NestedConfig {
        #[config(default = 10)]
        pub value: i32,
    }

    // -- Fixture for enum and list tests ----------------------------------------

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        Fast,
        Slow,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct ModeConfig {
        #[config(default = "fast")]
        pub mode: Mode,

        #[config(default = ["a", "b"])]
        pub tags: Vec<String>,
    }

    // -- Fixture for required-field tests ---------------------------------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct RequiredConfig {
        /// API token; no default, must be provided.
        pub token: String,
    }
}
