// Server configuration
// Decision: Environment variables only (after dotenvy), read once at start-up
// Decision: DATABASE_URL is not read here; the gateway reads it on first connect

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;

use crate::storage::{PersistenceGateway, PoolSettings};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Allowed CORS origins (`CORS_ALLOWED_ORIGINS`, comma-separated)
    pub cors_origins: Vec<HeaderValue>,
    /// Serve from the in-memory store (`DEV_MODE=true`)
    pub dev_mode: bool,
    /// PostgreSQL pool size (`DATABASE_MAX_CONNECTIONS`)
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            cors_origins: Vec::new(),
            dev_mode: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        // Only needed when the UI is served from a different origin than the API
        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        let dev_mode = lookup("DEV_MODE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS").filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            bind_addr,
            cors_origins,
            dev_mode,
            max_connections,
        })
    }

    /// Gateway for the configured store
    pub fn gateway(&self) -> PersistenceGateway {
        if self.dev_mode {
            PersistenceGateway::in_memory()
        } else {
            PersistenceGateway::postgres_from_env(PoolSettings {
                max_connections: self.max_connections,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.cors_origins.is_empty());
        assert!(!config.dev_mode);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            (
                "CORS_ALLOWED_ORIGINS",
                "https://app.example.com, https://admin.example.com",
            ),
            ("DEV_MODE", "TRUE"),
            ("DATABASE_MAX_CONNECTIONS", "25"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "https://admin.example.com");
        assert!(config.dev_mode);
        assert_eq!(config.max_connections, 25);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
    }

    #[test]
    fn test_dev_mode_gateway_is_in_memory() {
        let config = config(&[("DEV_MODE", "true")]).unwrap();
        assert!(!config.gateway().is_connected());
    }
}
