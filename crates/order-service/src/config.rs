//! Service configuration, read from `ORDER_SERVICE_*` environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ORDER_SERVICE_BIND_ADDR` | `127.0.0.1:8080` |
//! | `ORDER_SERVICE_RATE_LIMIT` | `100` |
//! | `ORDER_SERVICE_RATE_WINDOW_SECS` | `60` |
//! | `ORDER_SERVICE_REMINDER_AT` | `00:00` (local time, `HH:MM`) |
//! | `ORDER_SERVICE_STORE_BUFFER` | `32` |
//! | `ORDER_SERVICE_CHECKOUT_URL` | `https://shop.example.com/checkout` |
//!
//! Unset variables fall back to their default. Set but unparsable values are an
//! error.

use crate::rate_limiter::RateLimitConfig;
use chrono::NaiveTime;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub rate_limit: RateLimitConfig,
    /// Local time of day the reminder sweep runs.
    pub reminder_at: NaiveTime,
    /// Request channel capacity of every collection actor.
    pub store_buffer: usize,
    pub checkout_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            rate_limit: RateLimitConfig::default(),
            reminder_at: NaiveTime::MIN,
            store_buffer: 32,
            checkout_url: "https://shop.example.com/checkout".to_owned(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &'static str| {
            let value = lookup(key).filter(|value| !value.trim().is_empty());
            if value.is_none() {
                warn!(key, "Not set, using default");
            }
            value.map(|value| (key, value))
        };

        let bind_addr = var("ORDER_SERVICE_BIND_ADDR")
            .map(|(key, value)| parse(key, value, |v| v.parse::<SocketAddr>()))
            .transpose()?
            .unwrap_or(defaults.bind_addr);

        let limit = var("ORDER_SERVICE_RATE_LIMIT")
            .map(|(key, value)| parse(key, value, |v| v.parse::<u32>()))
            .transpose()?
            .unwrap_or(defaults.rate_limit.limit);

        let window = var("ORDER_SERVICE_RATE_WINDOW_SECS")
            .map(|(key, value)| parse(key, value, |v| v.parse::<u64>()))
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_limit.window);

        let reminder_at = var("ORDER_SERVICE_REMINDER_AT")
            .map(|(key, value)| parse(key, value, |v| NaiveTime::parse_from_str(v, "%H:%M")))
            .transpose()?
            .unwrap_or(defaults.reminder_at);

        let store_buffer = var("ORDER_SERVICE_STORE_BUFFER")
            .map(|(key, value)| parse(key, value, |v| v.parse::<usize>()))
            .transpose()?
            .unwrap_or(defaults.store_buffer);
        if store_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ORDER_SERVICE_STORE_BUFFER",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        let checkout_url = var("ORDER_SERVICE_CHECKOUT_URL")
            .map(|(_, value)| value.trim().to_owned())
            .unwrap_or(defaults.checkout_url);

        Ok(Self {
            bind_addr,
            rate_limit: RateLimitConfig { limit, window },
            reminder_at,
            store_buffer,
            checkout_url,
        })
    }
}

fn parse<T, E: std::fmt::Display>(
    key: &'static str,
    value: String,
    parser: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError> {
    parser(value.trim()).map_err(|error| ConfigError::Invalid {
        key,
        reason: error.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.rate_limit.limit, 100);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.reminder_at, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("ORDER_SERVICE_BIND_ADDR", "0.0.0.0:9000"),
            ("ORDER_SERVICE_RATE_LIMIT", "5"),
            ("ORDER_SERVICE_RATE_WINDOW_SECS", " 10 "),
            ("ORDER_SERVICE_REMINDER_AT", "23:30"),
            ("ORDER_SERVICE_STORE_BUFFER", "8"),
            ("ORDER_SERVICE_CHECKOUT_URL", "https://example.org/pay"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.rate_limit.limit, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(10));
        assert_eq!(config.reminder_at, NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.checkout_url, "https://example.org/pay");
    }

    #[test]
    fn unparsable_values_are_errors() {
        let err = load(&[("ORDER_SERVICE_RATE_LIMIT", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ORDER_SERVICE_RATE_LIMIT", .. }));

        assert!(load(&[("ORDER_SERVICE_REMINDER_AT", "25:00")]).is_err());
        assert!(load(&[("ORDER_SERVICE_STORE_BUFFER", "0")]).is_err());
    }
}
