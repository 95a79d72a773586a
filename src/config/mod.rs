use std::fmt;
use std::sync::Arc;

pub use config::Map;
use config::{ConfigError, Environment};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use database::{DatabaseType, EngineOptions, PoolOptions};
pub use server::ServerConfig;

mod database;
mod server;

static SETTINGS: OnceCell<Arc<Settings>> = OnceCell::new();

/// Application settings.
///
/// Every field can be overridden by the environment variable of the same name
/// (matched case-insensitively), either exported or written to `.env` in the
/// working directory.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub debug: bool,

    pub db_type: DatabaseType,

    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,

    // Pool tuning, Postgres only.
    pub pool_size: u32,
    pub max_overflow: u32,
    /// Seconds to wait for a connection.
    pub pool_timeout: u64,
    pub pool_pre_ping: bool,
    /// Seconds before a connection is recycled.
    pub pool_recycle: u64,
    pub pool_use_lifo: bool,
    pub echo: bool,

    pub sqlite_db_path: String,

    pub jwt_secret: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "What to Eat".into(),
            debug: false,
            db_type: DatabaseType::default(),
            db_host: "localhost".into(),
            db_port: 5432,
            db_user: "postgres".into(),
            db_password: "postgres".into(),
            db_name: "what2eat".into(),
            pool_size: 20,
            max_overflow: 10,
            pool_timeout: 30,
            pool_pre_ping: true,
            pool_recycle: 3600,
            pool_use_lifo: false,
            echo: false,
            sqlite_db_path: "./data/what2eat.sqlite3".into(),
            jwt_secret: "lvlvdexiaocao".into(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("debug", &self.debug)
            .field("db_type", &self.db_type)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"[REDACTED]")
            .field("db_name", &self.db_name)
            .field("pool_size", &self.pool_size)
            .field("max_overflow", &self.max_overflow)
            .field("pool_timeout", &self.pool_timeout)
            .field("pool_pre_ping", &self.pool_pre_ping)
            .field("pool_recycle", &self.pool_recycle)
            .field("pool_use_lifo", &self.pool_use_lifo)
            .field("echo", &self.echo)
            .field("sqlite_db_path", &self.sqlite_db_path)
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    ///
    /// Variables already exported take precedence over `.env`. Missing values
    /// fall back to [`Settings::default`]; an unknown `DB_TYPE` or a value that
    /// does not parse into its field is an error.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        deserialize_env(Environment::default())
    }

    /// Load settings from an explicit set of variables instead of the process
    /// environment.
    pub fn from_env_source(vars: Map<String, String>) -> Result<Self, ConfigError> {
        deserialize_env(Environment::default().source(Some(vars)))
    }
}

/// Returns the process-wide settings, loading them on first use.
///
/// A failed load is not cached, so a later call tries again.
pub fn get_settings() -> Result<Arc<Settings>, ConfigError> {
    SETTINGS
        .get_or_try_init(|| {
            let settings = Settings::load()?;
            tracing::debug!(?settings, "settings loaded");
            Ok(Arc::new(settings))
        })
        .cloned()
}

/// Everything the service needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Arc<Settings>,
    pub server_config: ServerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            settings: get_settings()?,
            server_config: ServerConfig::load()?,
        })
    }
}

fn deserialize_env<T: DeserializeOwned>(environment: Environment) -> Result<T, ConfigError> {
    config::Config::builder()
        .add_source(environment)
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = Settings::from_env_source(Map::new()).unwrap();

        assert_eq!(settings.app_name, "What to Eat");
        assert!(!settings.debug);
        assert_eq!(settings.db_type, DatabaseType::Sqlite);
        assert_eq!(settings.sqlite_db_path, "./data/what2eat.sqlite3");
        assert_eq!(settings.db_port, 5432);
        assert_eq!(settings.pool_size, 20);
        assert_eq!(settings.max_overflow, 10);
        assert_eq!(settings.pool_timeout, 30);
        assert!(settings.pool_pre_ping);
        assert_eq!(settings.pool_recycle, 3600);
        assert!(!settings.pool_use_lifo);
        assert!(!settings.echo);
        assert_eq!(settings.jwt_secret, "lvlvdexiaocao");
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_env_source(vars(&[
            ("APP_NAME", "Lunch Picker"),
            ("DEBUG", "true"),
            ("DB_TYPE", "postgres"),
            ("DB_HOST", "pg"),
            ("DB_PORT", "15432"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "food"),
            ("POOL_SIZE", "7"),
            ("POOL_USE_LIFO", "true"),
            ("ECHO", "true"),
            ("JWT_SECRET", "another-secret"),
        ]))
        .unwrap();

        assert_eq!(settings.app_name, "Lunch Picker");
        assert!(settings.debug);
        assert_eq!(settings.db_type, DatabaseType::Postgres);
        assert_eq!(settings.db_port, 15432);
        assert_eq!(settings.pool_size, 7);
        assert!(settings.pool_use_lifo);
        assert!(settings.echo);
        assert_eq!(settings.jwt_secret, "another-secret");
        assert_eq!(
            settings.database_url(),
            "postgresql+asyncpg://app:pw@pg:15432/food"
        );
    }

    #[test]
    fn variable_names_are_case_insensitive() {
        let settings = Settings::from_env_source(vars(&[
            ("app_name", "lower"),
            ("Sqlite_Db_Path", "/tmp/mixed.sqlite3"),
        ]))
        .unwrap();

        assert_eq!(settings.app_name, "lower");
        assert_eq!(settings.sqlite_db_path, "/tmp/mixed.sqlite3");
    }

    #[test]
    fn unknown_db_type_is_rejected() {
        let result = Settings::from_env_source(vars(&[("DB_TYPE", "mysql")]));

        assert!(result.is_err());
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let result = Settings::from_env_source(vars(&[("DB_PORT", "not-a-port")]));

        assert!(result.is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = Settings {
            db_password: "hunter2".into(),
            jwt_secret: "top-secret".into(),
            ..Settings::default()
        };

        let output = format!("{settings:?}");

        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("hunter2"));
        assert!(!output.contains("top-secret"));
        assert!(output.contains("What to Eat"));
    }
}
