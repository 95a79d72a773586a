use std::fmt;

use serde::{Deserialize, Serialize};

use super::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgres,
    #[default]
    Sqlite,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgres",
            DatabaseType::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pool tuning handed to the database client. Only built for Postgres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolOptions {
    pub pool_size: u32,
    pub max_overflow: u32,
    pub pool_timeout: u64,
    pub pool_use_lifo: bool,
}

/// Options for creating the async engine.
///
/// Serializes as a flat mapping: the pool keys followed by `echo` for Postgres,
/// just `echo` for SQLite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    #[serde(flatten)]
    pub pool: Option<PoolOptions>,
    pub echo: bool,
}

impl Settings {
    /// Connection URI for the async driver of the configured backend.
    pub fn database_url(&self) -> String {
        match self.db_type {
            DatabaseType::Postgres => format!(
                "postgresql+asyncpg://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            ),
            DatabaseType::Sqlite => format!("sqlite+aiosqlite:///{}", self.sqlite_db_path),
        }
    }

    /// Same as [`Settings::database_url`] with the password masked, for logs.
    pub fn redacted_database_url(&self) -> String {
        match self.db_type {
            DatabaseType::Postgres => format!(
                "postgresql+asyncpg://{}:***@{}:{}/{}",
                self.db_user, self.db_host, self.db_port, self.db_name
            ),
            DatabaseType::Sqlite => self.database_url(),
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        // SQLite has no pool settings.
        let pool = match self.db_type {
            DatabaseType::Postgres => Some(PoolOptions {
                pool_size: self.pool_size,
                max_overflow: self.max_overflow,
                pool_timeout: self.pool_timeout,
                pool_use_lifo: self.pool_use_lifo,
            }),
            DatabaseType::Sqlite => None,
        };

        EngineOptions {
            pool,
            echo: self.echo,
        }
    }
}
