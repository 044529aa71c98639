//! Session cookie attributes.
//!
//! The session cookie is always `HttpOnly`. Its cross-site attributes depend on
//! the deployment: development serves the dashboard over plain HTTP from a
//! different port, so `Secure` is off and `SameSite=Lax`; production requires
//! `Secure` and `SameSite=Strict`.

use std::env;

use crate::AppEnvironment;

pub const DEFAULT_COOKIE_NAME: &str = "token";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl CookieConfig {
    pub fn for_environment(environment: AppEnvironment) -> Self {
        let (secure, same_site) = if environment.is_production() {
            (true, SameSitePolicy::Strict)
        } else {
            (false, SameSitePolicy::Lax)
        };

        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            secure,
            same_site,
        }
    }

    pub fn from_env(environment: AppEnvironment) -> Self {
        let mut config = Self::for_environment(environment);
        if let Some(name) = env::var("COOKIE_NAME").ok().filter(|n| !n.trim().is_empty()) {
            config.name = name.trim().to_string();
        }
        config
    }
}
