use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which of the two backends is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    Admin,
    Academic,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Admin => "admin-backend",
            ServiceKind::Academic => "academic-backend",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Admin => 5001,
            ServiceKind::Academic => 5002,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub kind: ServiceKind,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `None` allows any origin.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
    /// Key clients by the first `X-Forwarded-For` hop. Only safe behind a
    /// proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Parse `key` as `T`. Missing or unparseable (including out of range) is `None`.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl Config {
    pub fn from_env(kind: ServiceKind) -> anyhow::Result<Self> {
        Self::from_source(kind, |key| env::var(key).ok())
    }

    pub fn from_map(kind: ServiceKind, values: &HashMap<String, String>) -> anyhow::Result<Self> {
        Self::from_source(kind, |key| values.get(key).cloned())
    }

    pub fn from_source<F>(kind: ServiceKind, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var::<u16, _>(&lookup, "PORT").unwrap_or_else(|| kind.default_port());

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("SUPABASE_DB_URL"))
            .unwrap_or_else(|| "postgresql://localhost/college_erp".to_string());

        let origin = lookup("CORS_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "*");

        let window_ms = parse_var::<u64, _>(&lookup, "RATE_LIMIT_WINDOW_MS").unwrap_or(15 * 60 * 1000);
        if window_ms == 0 {
            anyhow::bail!("RATE_LIMIT_WINDOW_MS must be greater than zero");
        }

        let max_requests = parse_var::<u32, _>(&lookup, "RATE_LIMIT_MAX_REQUESTS").unwrap_or(100);
        if max_requests == 0 {
            anyhow::bail!("RATE_LIMIT_MAX_REQUESTS must be greater than zero");
        }

        let max_connections = parse_var::<u32, _>(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10);
        let min_connections = parse_var::<u32, _>(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(1);
        if max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be greater than zero");
        }
        if min_connections > max_connections {
            anyhow::bail!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                min_connections,
                max_connections
            );
        }

        Ok(Self {
            service: ServiceConfig {
                kind,
                environment: lookup("APP_ENV")
                    .map(|v| Environment::parse(&v))
                    .unwrap_or(Environment::Development),
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                acquire_timeout_secs: parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS").unwrap_or(8),
            },
            cors: CorsConfig { origin },
            rate_limit: RateLimitConfig {
                window_ms,
                max_requests,
                trust_forwarded_for: parse_flag(&lookup, "RATE_LIMIT_TRUST_PROXY"),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_per_service() {
        let empty = HashMap::new();
        let admin = Config::from_map(ServiceKind::Admin, &empty).unwrap();
        let academic = Config::from_map(ServiceKind::Academic, &empty).unwrap();

        assert_eq!(admin.service.port, 5001);
        assert_eq!(academic.service.port, 5002);
        assert_eq!(academic.service.environment, Environment::Development);
        assert_eq!(academic.cors.origin, None);
        assert_eq!(academic.rate_limit.max_requests, 100);
        assert_eq!(academic.rate_limit.window(), Duration::from_secs(900));
        assert_eq!(academic.server_address(), "0.0.0.0:5002");
    }

    #[test]
    fn test_overrides() {
        let values = map(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("CORS_ORIGIN", "https://erp.example.edu"),
            ("SUPABASE_DB_URL", "postgresql://db.example.edu/erp"),
            ("RATE_LIMIT_MAX_REQUESTS", "5"),
            ("RATE_LIMIT_WINDOW_MS", "1000"),
        ]);
        let config = Config::from_map(ServiceKind::Academic, &values).unwrap();

        assert_eq!(config.service.port, 8080);
        assert!(config.service.environment.is_production());
        assert_eq!(config.cors.origin.as_deref(), Some("https://erp.example.edu"));
        assert_eq!(config.database.url, "postgresql://db.example.edu/erp");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 1000);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let values = map(&[("PORT", "eighty"), ("DB_MAX_CONNECTIONS", "lots"), ("CORS_ORIGIN", "*")]);
        let config = Config::from_map(ServiceKind::Admin, &values).unwrap();

        assert_eq!(config.service.port, 5001);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.cors.origin, None);
    }

    #[test]
    fn test_zero_window_rejected() {
        let values = map(&[("RATE_LIMIT_WINDOW_MS", "0")]);
        assert!(Config::from_map(ServiceKind::Admin, &values).is_err());
    }

    #[test]
    fn test_out_of_range_counts_fall_back_instead_of_wrapping() {
        let values = map(&[
            ("RATE_LIMIT_MAX_REQUESTS", "4294967296"),
            ("DB_MAX_CONNECTIONS", "4294967297"),
        ]);
        let config = Config::from_map(ServiceKind::Academic, &values).unwrap();

        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_zero_max_requests_rejected() {
        let values = map(&[("RATE_LIMIT_MAX_REQUESTS", "0")]);
        assert!(Config::from_map(ServiceKind::Academic, &values).is_err());
    }

    #[test]
    fn test_pool_bounds_checked() {
        let values = map(&[("DB_MIN_CONNECTIONS", "20"), ("DB_MAX_CONNECTIONS", "5")]);
        assert!(Config::from_map(ServiceKind::Academic, &values).is_err());

        let values = map(&[("DB_MIN_CONNECTIONS", "5"), ("DB_MAX_CONNECTIONS", "5")]);
        let config = Config::from_map(ServiceKind::Academic, &values).unwrap();
        assert_eq!(config.database.min_connections, 5);
    }

    #[test]
    fn test_forwarded_for_trust_is_opt_in() {
        let config = Config::from_map(ServiceKind::Academic, &HashMap::new()).unwrap();
        assert!(!config.rate_limit.trust_forwarded_for);

        let values = map(&[("RATE_LIMIT_TRUST_PROXY", "true")]);
        let config = Config::from_map(ServiceKind::Academic, &values).unwrap();
        assert!(config.rate_limit.trust_forwarded_for);
    }
}
