use std::{collections::HashMap, env, fmt::Display, path::PathBuf, str::FromStr};

use axum::http::HeaderValue;
use thiserror::Error;
use tracing::info;

const DEFAULT_PORT: &str = "5000";
const DEFAULT_DATABASE_URL: &str = "sqlite:bookings.db";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Browser origin allowed to call the API
    pub cors_origin: HeaderValue,
    /// Built frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<&str, &str>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: try_load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            cors_origin: try_load(&lookup, "CORS_ORIGIN", DEFAULT_CORS_ORIGIN)?,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value: raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_map(&HashMap::new()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "sqlite:bookings.db");
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.static_dir, None);
    }

    #[test]
    fn test_values_from_environment() {
        let vars = HashMap::from([
            ("PORT", "8081"),
            ("DATABASE_URL", "sqlite:/var/lib/halls.db"),
            ("CORS_ORIGIN", "https://halls.example.org"),
            ("STATIC_DIR", "frontend/dist"),
        ]);
        let config = Config::from_map(&vars).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.database_url, "sqlite:/var/lib/halls.db");
        assert_eq!(config.cors_origin, "https://halls.example.org");
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend/dist")));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let vars = HashMap::from([("PORT", "abc")]);
        let err = Config::from_map(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
        assert!(err.to_string().contains("\"abc\""));
    }
}
