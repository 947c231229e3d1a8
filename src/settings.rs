use config::{Config, ConfigError, Environment, File, Source};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Defaults, then `trivia.toml` if present, then `TRIVIA_*` variables
    /// (`TRIVIA_APPLICATION__PORT=5000`). A `.env` file is loaded first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::layered(
            File::with_name("trivia").required(false),
            Self::environment(),
        )
    }

    fn layered(
        file: impl Source + Send + Sync + 'static,
        environment: impl Source + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("TRIVIA")
            .prefix_separator("_")
            .separator("__")
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 5000)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_are_complete() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.application.address(), "0.0.0.0:5000");
        assert_eq!(settings.database.url.expose_secret(), "sqlite:trivia.db");
        assert_eq!(settings.database.max_connections, 5);
    }

    #[test]
    fn overrides_accept_numeric_strings() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("application.port", "8080")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.application.port, 8080);
    }

    fn variables(pairs: &[(&str, &str)]) -> Environment {
        Settings::environment().source(Some(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(
            &path,
            "[application]\nhost = \"127.0.0.1\"\nport = 7000\n\n[database]\nmax_connections = 2\n",
        )
        .unwrap();

        let settings = Settings::layered(
            File::from(path.as_path()),
            variables(&[
                ("TRIVIA_APPLICATION__PORT", "8081"),
                ("TRIVIA_DATABASE__URL", "sqlite::memory:"),
                ("OTHER_APPLICATION__PORT", "9999"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.application.address(), "127.0.0.1:8081");
        assert_eq!(settings.database.url.expose_secret(), "sqlite::memory:");
        assert_eq!(settings.database.max_connections, 2);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::layered(
            File::with_name("no-such-trivia-settings").required(false),
            variables(&[]),
        )
        .unwrap();
        assert_eq!(settings.application.address(), "0.0.0.0:5000");
    }
}
