use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::app::RetryConfig;

#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Base URL of the supplier API
    pub supplier_url: String,
    /// Per-attempt timeout and backoff for supplier calls
    pub supplier_retry: RetryConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid BIND_ADDR '{}': {}", bind_addr, e))?;

        let defaults = RetryConfig::default();
        let supplier_retry = RetryConfig::new()
            .with_timeout_ms(env_or("SUPPLIER_TIMEOUT_MS", defaults.timeout_ms)?)
            .with_max_retries(env_or("SUPPLIER_MAX_RETRIES", defaults.max_retries)?)
            .with_base_delay_ms(env_or("SUPPLIER_BASE_DELAY_MS", defaults.base_delay_ms)?)
            .with_max_delay_ms(env_or("SUPPLIER_MAX_DELAY_MS", defaults.max_delay_ms)?);

        Ok(Self {
            bind_addr,
            supplier_url: env::var("SUPPLIER_URL")
                .unwrap_or_else(|_| "http://localhost:9090".to_string()),
            supplier_retry,
        })
    }
}

/// Read a numeric variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}
