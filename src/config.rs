//! Application configuration.
//!
//! Values are resolved once at startup into a [`ServerConfig`] and passed
//! down explicitly; nothing here is global mutable state.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ==================== Defaults ====================

/// Default database location when neither config.toml nor the environment set one
pub const DEFAULT_DB_PATH: &str = "data/pacer.db";

/// Server address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Review cards per day when a student has no usable budget setting
pub const DEFAULT_BUDGET_PER_DAY: usize = 20;

// ==================== Query Limits ====================

/// Default page size for decision log listings
pub const DEFAULT_LOG_LIMIT: i64 = 20;

/// Decision log listings cover this many days (inclusive) when no start date is given
pub const DEFAULT_LOG_WINDOW_DAYS: i64 = 7;

/// Default page size for coach memo listings
pub const DEFAULT_MEMO_LIMIT: i64 = 100;

/// Default page size for student listings
pub const DEFAULT_STUDENT_LIMIT: i64 = 100;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    server: Option<ServerSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub addr: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            addr: DEFAULT_SERVER_ADDR.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    /// Load with priority: config.toml > environment (.env) > defaults
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = read_file_config(Path::new("config.toml"));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let database = file.database.unwrap_or(DatabaseSection { path: None });
        let server = file.server.unwrap_or(ServerSection {
            addr: None,
            port: None,
        });

        let db_path = if let Some(path) = database.path {
            tracing::info!("Using database from config.toml: {}", path);
            PathBuf::from(path)
        } else if let Some(path) = env("DATABASE_PATH") {
            tracing::info!("Using database from DATABASE_PATH env: {}", path);
            PathBuf::from(path)
        } else {
            tracing::info!("Using default database path: {}", defaults.db_path.display());
            defaults.db_path
        };

        let addr = server
            .addr
            .or_else(|| env("PACER_ADDR"))
            .unwrap_or(defaults.addr);

        let port = server
            .port
            .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
            .unwrap_or(defaults.port);

        Self {
            db_path,
            addr,
            port,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

fn read_file_config(path: &Path) -> FileConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };
    match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}
