//! Credential verification strategies.
//!
//! The Session Issuer never compares passwords itself; it asks a
//! [`CredentialVerifier`]. Two strategies ship:
//!
//! - [`PlaintextVerifier`]: exact string equality against the stored value.
//!   This is the default and matches how existing Credential Records are
//!   stored. It is not constant-time and keeps passwords readable in the
//!   store.
//! - [`BcryptVerifier`]: stores a bcrypt hash and verifies against it.
//!
//! Switching strategy changes the stored format, so records created under one
//! scheme do not verify under the other.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub trait CredentialVerifier: Send + Sync {
    /// Whether `candidate` matches the `stored` credential.
    fn verify(&self, candidate: &str, stored: &str) -> bool;

    /// Turns a raw password into the form persisted on the record.
    fn encode(&self, raw: &str) -> Result<String, AppError> {
        Ok(raw.to_string())
    }

    fn scheme(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        candidate == stored
    }

    fn scheme(&self) -> &'static str {
        "plaintext"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialVerifier for BcryptVerifier {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        match verify(candidate, stored) {
            Ok(matches) => matches,
            Err(e) => {
                // A stored value that is not a bcrypt hash can never match.
                tracing::warn!(error = %e, "Stored credential is not a valid bcrypt hash");
                false
            }
        }
    }

    fn encode(&self, raw: &str) -> Result<String, AppError> {
        hash(raw, self.cost)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    fn scheme(&self) -> &'static str {
        "bcrypt"
    }
}
