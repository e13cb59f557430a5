//! Configuration loading and representation.

use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_JWT_TTL_MINUTES: u64 = 480;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES is enabled")]
    MissingDatabaseUrl,
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub bind: String,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    /// `Some` when writes are mirrored to Postgres.
    pub database_url: Option<String>,
    pub seed_mock: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET not set; using the development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let ttl_minutes = match var("JWT_TTL_MINUTES") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "JWT_TTL_MINUTES",
                expected: "number of minutes",
                value: raw,
            })?,
            None => DEFAULT_JWT_TTL_MINUTES,
        };

        let persistent = parse_flag("USE_PERSISTENT_STORES", var("USE_PERSISTENT_STORES"), false)?;
        let database_url = if persistent {
            Some(var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?)
        } else {
            None
        };

        Ok(Self {
            bind: var("LODGEX_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            jwt_secret,
            jwt_ttl: Duration::from_secs(ttl_minutes * 60),
            database_url,
            seed_mock: parse_flag("LODGEX_SEED_MOCK", var("LODGEX_SEED_MOCK"), true)?,
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        })
    }

    /// In-memory, seeded, simulated AI. Used by tests and local runs.
    pub fn local(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_ttl: Duration::from_secs(DEFAULT_JWT_TTL_MINUTES * 60),
            database_url: None,
            seed_mock: true,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    pub fn persistent(&self) -> bool {
        self.database_url.is_some()
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("jwt_ttl", &self.jwt_ttl)
            .field("persistent", &self.persistent())
            .field("seed_mock", &self.seed_mock)
            .field("gemini", &self.gemini_api_key.is_some())
            .field("gemini_model", &self.gemini_model)
            .finish_non_exhaustive()
    }
}

fn parse_flag(name: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "boolean",
            value: raw,
        }),
    }
}
