use std::env;

/// Storage backend selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "memory" | "mem" => StorageBackend::Memory,
            _ => StorageBackend::Postgres,
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub app_env: String,

    // Storage
    pub storage_backend: StorageBackend,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,

    // Admin
    pub admin_key: String,

    // Listing
    pub default_page_limit: u32,
    pub max_page_limit: u32,

    // Notifications
    pub notification_capacity: usize,
    pub notification_retention_hours: i64,
    pub notification_sweep_secs: u64,
}

/// Read an env var and parse it, falling back to `default` when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env_or("PORT", 5000),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            // Storage
            storage_backend: env::var("STORAGE_BACKEND")
                .map(|v| StorageBackend::parse(&v))
                .unwrap_or(StorageBackend::Postgres),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/movie_catalog".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            db_acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 30),

            // Admin
            admin_key: env::var("ADMIN_KEY").unwrap_or_else(|_| "admin123".to_string()),

            // Listing
            default_page_limit: env_or("DEFAULT_PAGE_LIMIT", 50),
            max_page_limit: env_or("MAX_PAGE_LIMIT", 100),

            // Notifications
            notification_capacity: env_or("NOTIFICATION_CAPACITY", 500),
            notification_retention_hours: env_or("NOTIFICATION_RETENTION_HOURS", 720), // 30 days
            notification_sweep_secs: env_or("NOTIFICATION_SWEEP_SECS", 3600),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            app_env: "development".to_string(),
            storage_backend: StorageBackend::Memory,
            database_url: "postgres://localhost/movie_catalog".to_string(),
            db_max_connections: 10,
            db_acquire_timeout_secs: 30,
            admin_key: "admin123".to_string(),
            default_page_limit: 50,
            max_page_limit: 100,
            notification_capacity: 500,
            notification_retention_hours: 720,
            notification_sweep_secs: 3600,
        }
    }
}
