use crate::services::statement::DEFAULT_TERM_LIMIT;
use serde::Deserialize;
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "DB_config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file {0} is not a .json file")]
    NotJson(PathBuf),
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load .env: {0}")]
    Env(#[from] dotenvy::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid database port '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DsnConfig {
    pub addr: String,
    pub port: String,
    #[serde(rename = "DB_NAME")]
    pub db_name: String,
}

/// Database accounts. Passwords never come from the file.
#[derive(Clone, Deserialize)]
pub struct DbUsers {
    pub admin: String,
    #[serde(skip)]
    pub admin_pass: String,
    pub search: String,
    #[serde(skip)]
    pub search_pass: String,
}

// Hand-written so `{:?}` on the config never prints a password.
impl fmt::Debug for DbUsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbUsers")
            .field("admin", &self.admin)
            .field("admin_pass", &"***")
            .field("search", &self.search)
            .field("search_pass", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_term_result_limit")]
    pub term_result_limit: u32,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_term_result_limit() -> u32 {
    DEFAULT_TERM_LIMIT
}

fn default_max_connections() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            term_result_limit: default_term_result_limit(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "DSN_config")]
    pub dsn: DsnConfig,
    #[serde(rename = "DB_users")]
    pub users: DbUsers,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Reads the JSON file, loads `.env` unless `ENVIRONMENT` is set, and
    /// fills in the passwords from `ADMIN_PASS` / `SEARCH_PASS`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;

        if env::var("ENVIRONMENT").unwrap_or_default().is_empty() {
            dotenvy::from_filename(".env")?;
        }

        config.apply_secrets(
            env::var("ADMIN_PASS").unwrap_or_default(),
            env::var("SEARCH_PASS").unwrap_or_default(),
        );
        Ok(config)
    }

    /// Parses the file alone, without touching the environment.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(ConfigError::NotJson(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config file {}", path.display());

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn apply_secrets(&mut self, admin_pass: String, search_pass: String) {
        self.users.admin_pass = admin_pass;
        self.users.search_pass = search_pass;
    }

    pub fn db_port(&self) -> Result<u16, ConfigError> {
        self.dsn
            .port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(self.dsn.port.clone()))
    }

    /// Connection for the admin account: utf8mb4, TLS when the server offers
    /// it, no certificate verification.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, ConfigError> {
        Ok(MySqlConnectOptions::new()
            .host(&self.dsn.addr)
            .port(self.db_port()?)
            .username(&self.users.admin)
            .password(&self.users.admin_pass)
            .database(&self.dsn.db_name)
            .charset("utf8mb4")
            .ssl_mode(MySqlSslMode::Preferred))
    }

    /// The connection string with the password masked, for logs.
    pub fn redacted_dsn(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}?ssl-mode=preferred&charset=utf8mb4",
            self.users.admin, self.dsn.addr, self.dsn.port, self.dsn.db_name
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
