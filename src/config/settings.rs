//! Process settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "grimoire_api=info,tower_http=info";

/// Which datastore backs the repositories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local tables; contents are lost on exit.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: v })?,
            None => DEFAULT_PORT,
        };
        let host = match get("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "HOST", value: v })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let store = match get("GRIMOIRE_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("postgres") => {
                let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                    Some(v) => match v.parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::Invalid {
                                key: "DATABASE_MAX_CONNECTIONS",
                                value: v,
                            })
                        }
                    },
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StoreConfig::Postgres {
                    database_url,
                    max_connections,
                }
            }
            Some("memory") => StoreConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "GRIMOIRE_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Settings {
            host,
            port,
            store,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_with_database_url() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/grimoire")]).unwrap();
        assert_eq!(s.port, 3000);
        assert_eq!(s.bind_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(
            s.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/grimoire".into(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = settings(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_store_needs_no_database() {
        let s = settings(&[("GRIMOIRE_STORE", "Memory"), ("PORT", "8080")]).unwrap();
        assert_eq!(s.store, StoreConfig::Memory);
        assert_eq!(s.port, 8080);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("GRIMOIRE_STORE", "memory"), ("PORT", "abc")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            settings(&[("GRIMOIRE_STORE", "sqlite")]),
            Err(ConfigError::Invalid { key: "GRIMOIRE_STORE", .. })
        ));
        assert!(matches!(
            settings(&[("DATABASE_URL", "postgres://x/y"), ("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = settings(&[("GRIMOIRE_STORE", "memory"), ("PORT", "  ")]).unwrap();
        assert_eq!(s.port, DEFAULT_PORT);
    }
}
