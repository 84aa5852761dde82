//! Server Configuration
//!
//! Read from the environment (and `.env` when present).

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Credentials for the first administrator
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password: "password".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub database_path: PathBuf,
    /// Prefix of the chores endpoints, no trailing slash (e.g. `/chores`)
    pub base_path: String,
    pub static_dir: PathBuf,
    pub media_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_keep: usize,
    pub admin: AdminSeed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_path: PathBuf::from("homebase.db"),
            base_path: "/chores".to_string(),
            static_dir: PathBuf::from("dist"),
            media_dir: PathBuf::from("media"),
            log_dir: PathBuf::from("logs"),
            log_keep: rolling_logger::DEFAULT_KEEP,
            admin: AdminSeed::default(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or blank values keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(value) = get("HOMEBASE_BIND") {
            config.bind = value.parse().map_err(|_| ConfigError::Invalid {
                name: "HOMEBASE_BIND",
                expected: "socket address",
                value: value.clone(),
            })?;
        }
        if let Some(value) = get("HOMEBASE_DATABASE_PATH") {
            config.database_path = PathBuf::from(value);
        }
        if let Some(value) = get("HOMEBASE_BASE_PATH") {
            config.base_path = normalize_base_path(&value);
        }
        if let Some(value) = get("HOMEBASE_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }
        if let Some(value) = get("HOMEBASE_MEDIA_DIR") {
            config.media_dir = PathBuf::from(value);
        }
        if let Some(value) = get("HOMEBASE_LOG_DIR") {
            config.log_dir = PathBuf::from(value);
        }
        if let Some(value) = get("HOMEBASE_LOG_KEEP") {
            config.log_keep = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|keep| *keep > 0)
                .ok_or(ConfigError::Invalid {
                    name: "HOMEBASE_LOG_KEEP",
                    expected: "positive integer",
                    value: value.clone(),
                })?;
        }
        if let Some(value) = get("HOMEBASE_INITIAL_ADMIN_NAME") {
            config.admin.name = value;
        }
        if let Some(value) = get("HOMEBASE_INITIAL_ADMIN_EMAIL") {
            config.admin.email = value;
        }
        if let Some(value) = get("HOMEBASE_INITIAL_ADMIN_PASSWORD") {
            config.admin.password = value;
        }

        Ok(config)
    }
}

/// `chores/` → `/chores`; `/` → `` (endpoints at the root)
fn normalize_base_path(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_path, "/chores");
        assert_eq!(config.log_keep, 7);
        assert_eq!(config.admin.email, "admin@example.com");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOMEBASE_BIND", "0.0.0.0:8080"),
            ("HOMEBASE_BASE_PATH", "household/"),
            ("HOMEBASE_LOG_KEEP", "3"),
            ("HOMEBASE_INITIAL_ADMIN_NAME", "Pat"),
            ("HOMEBASE_INITIAL_ADMIN_PASSWORD", " "),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.base_path, "/household");
        assert_eq!(config.log_keep, 3);
        assert_eq!(config.admin.name, "Pat");
        assert_eq!(config.admin.password, "password");
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("HOMEBASE_BIND", "nope")])).is_err());
        assert!(Config::from_lookup(lookup(&[("HOMEBASE_LOG_KEEP", "0")])).is_err());
        assert_eq!(normalize_base_path("/"), "");
    }
}
