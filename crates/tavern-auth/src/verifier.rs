//! Maps the configured password scheme onto a [`CredentialVerifier`].

use std::sync::Arc;

use tavern_config::{PasswordConfig, PasswordScheme};
use tavern_core::{BcryptVerifier, CredentialVerifier, PlaintextVerifier};

pub fn verifier_for(config: PasswordConfig) -> Arc<dyn CredentialVerifier> {
    match config.scheme {
        PasswordScheme::Plaintext => Arc::new(PlaintextVerifier),
        PasswordScheme::Bcrypt => Arc::new(BcryptVerifier::default()),
    }
}
