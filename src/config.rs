use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    pub delete_policy: EventDeletePolicy,
}

/// What deleting an event does to memberships and wishlist entries that
/// still reference it. Images and agendas are owned and always go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDeletePolicy {
    #[default]
    Cascade,
    Reject,
}

impl EventDeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventDeletePolicy::Cascade => "cascade",
            EventDeletePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for EventDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(EventDeletePolicy::Cascade),
            "reject" => Ok(EventDeletePolicy::Reject),
            other => Err(format!(
                "unknown event delete policy '{}', expected 'cascade' or 'reject'",
                other
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database: DatabaseConfig {
                url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite:data/event_hub.db".to_string()),
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "SERVER_PORT", 3000)?,
            },
            events: EventsConfig {
                delete_policy: match lookup("EVENT_DELETE_POLICY") {
                    Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
                    None => EventDeletePolicy::default(),
                },
            },
        })
    }

    /// In-memory configuration used by tests and demos.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            events: EventsConfig {
                delete_policy: EventDeletePolicy::default(),
            },
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value '{}' for {}", raw, key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database.url, "sqlite:data/event_hub.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.events.delete_policy, EventDeletePolicy::Cascade);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "8080"),
            ("EVENT_DELETE_POLICY", "Reject"),
        ]))
        .unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.events.delete_policy, EventDeletePolicy::Reject);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(Config::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("EVENT_DELETE_POLICY", "orphan")])).is_err());
    }
}
