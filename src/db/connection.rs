// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

pub const ENV_DB_PATH: &str = "ADCATALOG_DB_PATH";
pub const ENV_DB_MAX_CONNECTIONS: &str = "ADCATALOG_DB_MAX_CONNECTIONS";
pub const ENV_DB_BUSY_TIMEOUT_MS: &str = "ADCATALOG_DB_BUSY_TIMEOUT_MS";

/// Storage settings for the catalog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    /// Defaults overridden by `ADCATALOG_DB_*` environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_DB_MAX_CONNECTIONS) {
            config.max_connections = parse_setting(ENV_DB_MAX_CONNECTIONS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DB_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms = parse_setting(ENV_DB_BUSY_TIMEOUT_MS, &raw)?;
        }

        if config.max_connections == 0 {
            return Err(AppError::Other(format!(
                "{} must be at least 1",
                ENV_DB_MAX_CONNECTIONS
            )));
        }

        Ok(config)
    }
}

fn parse_setting(key: &str, raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| AppError::Other(format!("Invalid value for {}: {} ({})", key, raw, e)))
}

/// Database file under the platform data directory.
///
/// Path structure: {APP_DATA}/adcatalog/adcatalog.db, or ./adcatalog.db when
/// the platform reports no data directory.
fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("adcatalog"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adcatalog.db")
}

/// Create a connection pool
///
/// Every connection gets:
/// - Foreign keys enabled
/// - WAL journal
/// - Busy timeout from the config
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout_ms
        ))
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::info!(
        "Opened catalog database at {} (max {} connections)",
        config.path.display(),
        config.max_connections
    );

    Ok(pool)
}

/// Single-connection in-memory pool.
///
/// Each in-memory SQLite connection is its own database, so the pool is
/// capped at one connection to keep every caller on the same data.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// Schema-initialized single-connection pool for repository and service tests
#[cfg(test)]
pub(crate) fn create_test_pool() -> std::sync::Arc<ConnectionPool> {
    let pool = create_memory_pool().expect("memory pool");
    {
        let conn = pool.get().expect("pooled connection");
        crate::db::initialize_database(&conn).expect("catalog schema");
    }
    std::sync::Arc::new(pool)
}
