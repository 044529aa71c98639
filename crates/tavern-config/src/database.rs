//! Credential store configuration.
//!
//! # Environment Variables
//!
//! - `DATABASE_BACKEND`: `mongodb` (default) or `memory`
//! - `MONGODB_URI`: connection string, required for the MongoDB backend
//! - `MONGODB_DATABASE`: database name (default: `tavern`)
//!
//! The `memory` backend keeps records in process and loses them on restart.
//! It exists for local runs and tests.

use std::env;

use crate::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseConfig {
    Mongo { uri: String, database: String },
    Memory,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup("DATABASE_BACKEND").unwrap_or_else(|| "mongodb".to_string());

        match backend.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => {
                let uri = lookup("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;
                let database = lookup("MONGODB_DATABASE").unwrap_or_else(|| "tavern".to_string());
                Ok(Self::Mongo { uri, database })
            }
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid {
                key: "DATABASE_BACKEND",
                value: backend,
            }),
        }
    }
}
