//! Engine configuration from environment variables.

use std::fmt;
use std::str::FromStr;

/// Which document store backs the location repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MongoDb => write!(f, "mongodb"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// How request errors map to HTTP statuses.
///
/// `Compat` keeps the per-endpoint statuses existing clients rely on.
/// `Normalized` uses one consistent mapping and `{message}` bodies only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    #[default]
    Compat,
    Normalized,
}

impl FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(Self::Compat),
            "normalized" | "normalised" => Ok(Self::Normalized),
            other => Err(format!("unknown error mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub error_mode: ErrorMode,
    /// `*` or a comma-separated origin list. CORS is off when unset.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            store_backend: StoreBackend::default(),
            mongodb_uri: "mongodb://localhost:27017".into(),
            mongodb_database: "loc8r".into(),
            error_mode: ErrorMode::default(),
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or_default(
                "SERVER_PORT",
                var("SERVER_PORT").or_else(|| var("PORT")),
                defaults.server_port,
            ),
            store_backend: parse_or_default(
                "STORE_BACKEND",
                var("STORE_BACKEND"),
                defaults.store_backend,
            ),
            mongodb_uri: var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            mongodb_database: var("MONGODB_DATABASE").unwrap_or(defaults.mongodb_database),
            error_mode: parse_or_default("ERROR_MODE", var("ERROR_MODE"), defaults.error_mode),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        }
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + fmt::Debug,
    T::Err: fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, default = ?default, "Invalid config value, using default");
            default
        }
    }
}
