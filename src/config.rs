use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const DEV_JWT_SECRET: &str = "dev-only-insecure-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    /// Mailbox size of the user store actor.
    pub store_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: 30,
            store_buffer: 32,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using an insecure development secret");
            defaults.jwt_secret.clone()
        });

        Ok(Self {
            port: try_load("PORT", defaults.port)?,
            jwt_secret,
            token_ttl_days: try_load("TOKEN_TTL_DAYS", defaults.token_ttl_days)?,
            store_buffer: try_load("STORE_BUFFER", defaults.store_buffer)?,
        })
    }
}

fn try_load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
