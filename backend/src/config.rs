//! Server configuration read from the environment. A `.env` file in the
//! working directory is loaded first when present.

use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:fmss.db";
pub const DEFAULT_FRONTEND_DIST: &str = "../frontend/dist";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid bind address '{value}' in {key}")]
    InvalidBind { key: &'static str, value: String },
    #[error("Invalid port '{0}' in PORT")]
    InvalidPort(String),
    #[error("Invalid boolean '{value}' in {key}, expected true/false")]
    InvalidBool { key: &'static str, value: String },
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Directory with the built frontend, served for non-API paths
    pub frontend_dist: PathBuf,
    /// Origin allowed by CORS (the trunk dev server by default)
    pub allowed_origin: String,
    /// Fill empty tables with demo data on startup
    pub seed_demo: bool,
    /// Default tracing filter; RUST_LOG takes precedence
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let bind_value = get("FMSS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let mut bind_addr: SocketAddr =
            bind_value.parse().map_err(|_| ConfigError::InvalidBind {
                key: "FMSS_BIND",
                value: bind_value.clone(),
            })?;

        if let Some(port) = get("PORT") {
            let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            bind_addr.set_port(port);
        }

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.is_empty() {
            return Err(ConfigError::Empty("DATABASE_URL"));
        }

        let allowed_origin =
            get("FMSS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        if allowed_origin.is_empty() {
            return Err(ConfigError::Empty("FMSS_ALLOWED_ORIGIN"));
        }

        let seed_demo = match get("FMSS_SEED_DEMO") {
            Some(value) => parse_bool("FMSS_SEED_DEMO", &value)?,
            None => true,
        };

        Ok(Self {
            bind_addr,
            database_url,
            frontend_dist: PathBuf::from(
                get("FMSS_FRONTEND_DIST").unwrap_or_else(|| DEFAULT_FRONTEND_DIST.to_string()),
            ),
            allowed_origin,
            seed_demo,
            log_filter: get("FMSS_LOG")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            frontend_dist: PathBuf::from(DEFAULT_FRONTEND_DIST),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            seed_demo: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
