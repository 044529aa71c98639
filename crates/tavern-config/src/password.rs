use std::env;

use crate::ConfigError;

/// Which credential verification strategy the server runs with.
///
/// `PASSWORD_SCHEME=plaintext` (default) or `PASSWORD_SCHEME=bcrypt`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    Bcrypt,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordConfig {
    pub scheme: PasswordScheme,
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let scheme = match env::var("PASSWORD_SCHEME") {
            Ok(raw) => parse_scheme(&raw)?,
            Err(_) => PasswordScheme::default(),
        };
        Ok(Self { scheme })
    }
}

fn parse_scheme(raw: &str) -> Result<PasswordScheme, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "plaintext" | "plain" => Ok(PasswordScheme::Plaintext),
        "bcrypt" => Ok(PasswordScheme::Bcrypt),
        _ => Err(ConfigError::Invalid {
            key: "PASSWORD_SCHEME",
            value: raw.to_string(),
        }),
    }
}
