use superlists_core::item_text::ItemTextPolicy;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Which [`TodoStore`](superlists_db::store::TodoStore) the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local storage; everything is lost on restart.
    Memory,
}

impl StoreBackend {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "postgres" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How submitted item text is screened (default: reject blank).
    pub item_text_policy: ItemTextPolicy,
    /// Storage backend (default: Postgres).
    pub store: StoreBackend,
    /// Postgres connection string; required when `store` is Postgres.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
            item_text_policy: ItemTextPolicy::default(),
            store: StoreBackend::Postgres,
            database_url: None,
            db_max_connections: 20,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `HOST`                 | `0.0.0.0`        |
    /// | `PORT`                 | `3000`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`             |
    /// | `ITEM_TEXT_POLICY`     | `reject_blank`   |
    /// | `STORE`                | `postgres`       |
    /// | `DATABASE_URL`         | required for `postgres` |
    /// | `DB_MAX_CONNECTIONS`   | `20`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                expected: "a valid u16",
                value: v.clone(),
            })?,
            None => defaults.port,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value: v.clone(),
            })?,
            None => defaults.request_timeout_secs,
        };

        let item_text_policy = match lookup("ITEM_TEXT_POLICY") {
            Some(v) => ItemTextPolicy::parse(&v).map_err(|_| ConfigError::Invalid {
                var: "ITEM_TEXT_POLICY",
                expected: "one of accept_all, reject_blank",
                value: v.clone(),
            })?,
            None => defaults.item_text_policy,
        };

        let store = match lookup("STORE") {
            Some(v) => StoreBackend::parse(&v).ok_or_else(|| ConfigError::Invalid {
                var: "STORE",
                expected: "one of postgres, memory",
                value: v.clone(),
            })?,
            None => defaults.store,
        };

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                expected: "a valid u32",
                value: v.clone(),
            })?,
            None => defaults.db_max_connections,
        };

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            item_text_policy,
            store,
            database_url,
            db_max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_with_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/superlists")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.item_text_policy, ItemTextPolicy::RejectBlank);
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.db_max_connections, 20);
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
        assert_matches!(
            load(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn memory_store_needs_no_database() {
        let config = load(&[("STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("STORE", "memory"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8000"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("ITEM_TEXT_POLICY", "accept_all"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.item_text_policy, ItemTextPolicy::AcceptAll);
        assert_eq!(config.db_max_connections, 4);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert_matches!(
            load(&[("STORE", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("STORE", "memory"), ("ITEM_TEXT_POLICY", "maybe")]),
            Err(ConfigError::Invalid { var: "ITEM_TEXT_POLICY", .. })
        );
        assert_matches!(
            load(&[("STORE", "sqlite")]),
            Err(ConfigError::Invalid { var: "STORE", .. })
        );
    }
}
