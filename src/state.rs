use std::sync::Arc;

use tavern_auth::verifier_for;
use tavern_config::{
    AppEnvironment, CookieConfig, CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig,
};
use tavern_core::CredentialVerifier;
use tavern_db::{CredentialStore, connect_store};

/// Everything a request handler needs. Configuration is read once at startup
/// and carried here; nothing reads the environment after that.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub environment: AppEnvironment,
}

impl AppState {
    /// State for `environment` with default cookie and CORS settings.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        verifier: Arc<dyn CredentialVerifier>,
        jwt_config: JwtConfig,
        environment: AppEnvironment,
    ) -> Self {
        Self {
            store,
            verifier,
            jwt_config,
            cookie_config: CookieConfig::for_environment(environment),
            cors_config: CorsConfig {
                allowed_origins: Vec::new(),
            },
            environment,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("verifier", &self.verifier.scheme())
            .field("cookie_config", &self.cookie_config)
            .field("cors_config", &self.cors_config)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let environment = AppEnvironment::from_env()?;
    let store = connect_store(&DatabaseConfig::from_env()?)
        .await
        .map_err(|e| e.error)?;

    Ok(AppState {
        store,
        verifier: verifier_for(PasswordConfig::from_env()?),
        jwt_config: JwtConfig::from_env(environment)?,
        cookie_config: CookieConfig::from_env(environment),
        cors_config: CorsConfig::from_env(),
        environment,
    })
}
