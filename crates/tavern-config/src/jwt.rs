use std::env;

use crate::{AppEnvironment, ConfigError};

/// One day, the lifetime of every session token.
pub const DEFAULT_SESSION_EXPIRY: i64 = 86_400;

const DEVELOPMENT_SECRET: &str = "tavern-development-secret-change-me";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            session_expiry: DEFAULT_SESSION_EXPIRY,
        }
    }

    pub fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        Self::from_lookup(environment, |key| env::var(key).ok())
    }

    pub fn from_lookup(
        environment: AppEnvironment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::Missing("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET is not set, using the development signing secret");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        let session_expiry = match lookup("JWT_SESSION_EXPIRY") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "JWT_SESSION_EXPIRY",
                    value: raw,
                })?,
            None => DEFAULT_SESSION_EXPIRY,
        };

        Ok(Self {
            secret,
            session_expiry,
        })
    }
}
