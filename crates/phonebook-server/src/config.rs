//! Configuration management
//!
//! Everything is read from the process environment (after loading a `.env`
//! file if one exists) and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 3001;

/// Default time granted to in-flight requests on shutdown, in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 1;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// Directory of pre-built frontend assets, served ahead of the API
    pub static_dir: Option<PathBuf>,
}

/// Which entry store backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Entry store selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Seed the in-memory store with sample entries
    pub seed: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let backend = match lookup("PHONEBOOK_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store.backend,
        };

        let config = Config {
            server: ServerConfig {
                host: lookup("PHONEBOOK_HOST").unwrap_or(defaults.server.host),
                port: parsed(&lookup, "PORT")?.unwrap_or(defaults.server.port),
                shutdown_timeout_secs: parsed(&lookup, "PHONEBOOK_SHUTDOWN_TIMEOUT")?
                    .unwrap_or(defaults.server.shutdown_timeout_secs),
                static_dir: lookup("PHONEBOOK_STATIC_DIR")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from),
            },
            store: StoreConfig {
                backend,
                seed: parsed(&lookup, "PHONEBOOK_SEED")?.unwrap_or(defaults.store.seed),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
                max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parsed(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or(defaults.database.min_connections),
                connect_timeout_secs: parsed(&lookup, "DATABASE_CONNECT_TIMEOUT")?
                    .unwrap_or(defaults.database.connect_timeout_secs),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: parsed(&lookup, "CORS_ALLOW_CREDENTIALS")?
                    .unwrap_or(defaults.cors.allow_credentials),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.store.backend == StoreBackend::Postgres && self.database.url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when PHONEBOOK_STORE=postgres");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if let Some(ref dir) = self.server.static_dir {
            if !dir.is_dir() {
                tracing::warn!(
                    static_dir = %dir.display(),
                    "Static asset directory does not exist - assets will not be served"
                );
            }
        }

        Ok(())
    }
}

/// Parse `key` if it is set; a value that fails to parse is an error
fn parsed<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {key} value {raw:?}: {e}"))
        })
        .transpose()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                static_dir: None,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                seed: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
        }
    }
}
