//! Process configuration, read once at startup.
//!
//! Values come from the environment, optionally seeded from a `.env` file.
//! `DATABASE_URL`, `SESSION_SECRET` and `SESSION_NAME` are required; a missing
//! or malformed value aborts startup instead of failing individual requests.

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings for the signed session cookie.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signing secret. Any length; a 64-byte key is derived from it.
    pub secret: String,
    pub cookie_name: String,
    pub max_age: time::Duration,
    /// Adds the `Secure` attribute. Leave off for plain-HTTP development.
    pub secure: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub session: SessionConfig,
    pub listen_addr: SocketAddr,
    pub bcrypt_cost: u32,
    pub request_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port: u16 = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let max_age_secs: i64 =
            parse_or(&get, "SESSION_MAX_AGE_SECS", DEFAULT_SESSION_MAX_AGE_SECS)?;
        if max_age_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_MAX_AGE_SECS",
                value: max_age_secs.to_string(),
                reason: "must be positive".into(),
            });
        }
        let bcrypt_cost: u32 = parse_or(&get, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".into(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            session: SessionConfig {
                secret: required("SESSION_SECRET")?,
                cookie_name: required("SESSION_NAME")?,
                max_age: time::Duration::seconds(max_age_secs),
                secure: parse_or(&get, "SESSION_SECURE", false)?,
            },
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            bcrypt_cost,
            request_timeout: Duration::from_secs(parse_or(
                &get,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
        })
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}
