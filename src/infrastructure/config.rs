use std::env;
use tracing::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_TOKEN: &str = "demo-token";
pub const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:5500,http://localhost:5500,*";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server settings read from `HBNB_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_token: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_token: DEFAULT_API_TOKEN.to_string(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("HBNB_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "Invalid HBNB_PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: lookup("HBNB_HOST").unwrap_or(defaults.host),
            port,
            api_token: lookup("HBNB_API_TOKEN").unwrap_or(defaults.api_token),
            cors_origins: lookup("HBNB_CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
            log_level: lookup("HBNB_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
