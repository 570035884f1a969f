//! Alert service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOCKWATCH_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOCKWATCH_HOST` - Bind address (default: 127.0.0.1)
//! - `STOCKWATCH_PORT` - Listen port (default: 8080)
//! - `STOCKWATCH_SALES_WINDOW_DAYS` - Trailing window for sales velocity,
//!   in days (default: 30, must be at least 1)
//! - `STOCKWATCH_DEFAULT_THRESHOLD` - Low-stock floor for product types
//!   without an entry in the threshold table (default: 10)
//! - `STOCKWATCH_THRESHOLD_OVERRIDES` - JSON object merged over the
//!   built-in threshold table, e.g. `{"consumable": 25, "perishable": 50}`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g., production)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use crate::services::thresholds::DEFAULT_THRESHOLD;
use crate::services::velocity::SALES_WINDOW_DAYS;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Alert service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Alert computation tuning
    pub alerts: AlertsConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Tuning knobs for the alert computation.
#[derive(Debug, Clone)]
pub struct AlertsConfig {
    /// Trailing window the activity and velocity queries look back over,
    /// in days. Both queries share this value so they always agree on what
    /// "recent" means.
    pub window_days: u32,
    /// Low-stock floor for product types absent from the threshold table.
    pub default_threshold: i32,
    /// Per-product-type floors merged over the built-in table.
    pub threshold_overrides: HashMap<String, i32>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            window_days: SALES_WINDOW_DAYS,
            default_threshold: DEFAULT_THRESHOLD,
            threshold_overrides: HashMap::new(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any value
    /// fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOCKWATCH_DATABASE_URL")?;
        let host = get_env_or_default("STOCKWATCH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOCKWATCH_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOCKWATCH_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOCKWATCH_PORT".to_string(), e.to_string())
            })?;

        let alerts = AlertsConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            alerts,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AlertsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let window_days = parse_window_days(
            "STOCKWATCH_SALES_WINDOW_DAYS",
            &get_env_or_default("STOCKWATCH_SALES_WINDOW_DAYS", "30"),
        )?;
        let default_threshold = parse_threshold(
            "STOCKWATCH_DEFAULT_THRESHOLD",
            &get_env_or_default("STOCKWATCH_DEFAULT_THRESHOLD", "10"),
        )?;
        let threshold_overrides = match get_optional_env("STOCKWATCH_THRESHOLD_OVERRIDES") {
            Some(raw) => parse_threshold_overrides("STOCKWATCH_THRESHOLD_OVERRIDES", &raw)?,
            None => HashMap::new(),
        };

        Ok(Self {
            window_days,
            default_threshold,
            threshold_overrides,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., STOCKWATCH_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the sales window length. Zero is rejected: the velocity divisor
/// must stay positive.
fn parse_window_days(key: &str, raw: &str) -> Result<u32, ConfigError> {
    let days = raw
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if days == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(days)
}

/// Parse a single threshold value. Floors are counts of units, never
/// negative.
fn parse_threshold(key: &str, raw: &str) -> Result<i32, ConfigError> {
    let threshold = raw
        .parse::<i32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if threshold < 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be non-negative".to_string(),
        ));
    }
    Ok(threshold)
}

/// Parse the threshold override table from a JSON object of type -> floor.
fn parse_threshold_overrides(key: &str, raw: &str) -> Result<HashMap<String, i32>, ConfigError> {
    let overrides: HashMap<String, i32> = serde_json::from_str(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    for (product_type, threshold) in &overrides {
        if *threshold < 0 {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("threshold for {product_type:?} must be non-negative"),
            ));
        }
    }

    Ok(overrides)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_alerts_config_matches_builtin_constants() {
        let alerts = AlertsConfig::default();
        assert_eq!(alerts.window_days, 30);
        assert_eq!(alerts.default_threshold, 10);
        assert!(alerts.threshold_overrides.is_empty());
    }

    #[test]
    fn window_days_parses() {
        assert_eq!(parse_window_days("W", "7").unwrap(), 7);
    }

    #[test]
    fn window_days_rejects_zero() {
        let error = parse_window_days("W", "0").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidEnvVar(_, _)));
        assert!(error.to_string().contains("at least 1"));
    }

    #[test]
    fn window_days_rejects_garbage() {
        assert!(parse_window_days("W", "monthly").is_err());
        assert!(parse_window_days("W", "-3").is_err());
    }

    #[test]
    fn threshold_rejects_negative() {
        assert_eq!(parse_threshold("T", "0").unwrap(), 0);
        assert!(parse_threshold("T", "-1").is_err());
    }

    #[test]
    fn overrides_parse_from_json_object() {
        let overrides =
            parse_threshold_overrides("O", r#"{"consumable": 25, "perishable": 50}"#).unwrap();
        assert_eq!(overrides.get("consumable"), Some(&25));
        assert_eq!(overrides.get("perishable"), Some(&50));
    }

    #[test]
    fn overrides_reject_invalid_json() {
        assert!(parse_threshold_overrides("O", "consumable=25").is_err());
        assert!(parse_threshold_overrides("O", r#"["consumable"]"#).is_err());
    }

    #[test]
    fn overrides_reject_negative_floor() {
        let error = parse_threshold_overrides("O", r#"{"consumable": -5}"#).unwrap_err();
        assert!(error.to_string().contains("non-negative"));
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/stockwatch"),
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            alerts: AlertsConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }
}
