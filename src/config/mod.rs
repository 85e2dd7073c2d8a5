//! # Configuration
//!
//! Connection parameters for the primary store and the cache, loaded from an
//! optional TOML file with environment-variable overrides. No hidden
//! fallbacks beyond the documented defaults: what the loader returns is what
//! the adapters connect with.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_core::config::TodoConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TodoConfig::load()?;
//! let database_url = config.database.database_url();
//! let redis_url = config.redis.url();
//! # Ok(())
//! # }
//! ```

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Primary store connection and pooling configuration.
    pub database: DatabaseConfig,

    /// Cache connection configuration.
    pub redis: RedisConfig,
}

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Connection pool size.
    pub pool: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: "todos".to_string(),
            pool: 10,
        }
    }
}

impl DatabaseConfig {
    /// Build a PostgreSQL connection URL from the component parts.
    pub fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// Redis connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    /// Logical database index.
    pub db: i64,
    pub password: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
        }
    }
}

impl RedisConfig {
    /// Build a Redis connection URL from the component parts.
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!("redis://:{}@{}:{}/{}", password, self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

impl TodoConfig {
    /// Load configuration from `config/todo-config.toml` (optional), an
    /// environment-specific override file, and `TODO_`-prefixed environment
    /// variables (e.g. `TODO_DATABASE__HOST`).
    pub fn load() -> Result<Self> {
        let environment =
            std::env::var("TODO_ENV").unwrap_or_else(|_| "development".to_string());

        let settings = Config::builder()
            .add_source(File::with_name("config/todo-config").required(false))
            .add_source(
                File::with_name(&format!("config/todo-config-{environment}")).required(false),
            )
            .add_source(Environment::with_prefix("TODO").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
