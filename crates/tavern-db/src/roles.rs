//! Role creation and naming rules shared by the HTTP API and the CLI.

use tavern_core::{AppError, CredentialVerifier};
use tavern_models::{CredentialRecord, RoleId, find_blank_permission};

use crate::store::CredentialStore;

pub const ROLE_EXISTS: &str = "role already exists";
pub const ROLE_NAME_BLANK: &str = "role name must not be blank";
pub const PASSWORD_EMPTY: &str = "password must not be empty";

/// Trims surrounding whitespace; a name that is blank after trimming is a 400.
pub fn normalize_role_name(raw: &str) -> Result<&str, AppError> {
    let role_name = raw.trim();
    if role_name.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(ROLE_NAME_BLANK)));
    }
    Ok(role_name)
}

pub fn check_permissions(permissions: &[String]) -> Result<(), AppError> {
    match find_blank_permission(permissions) {
        Some(index) => Err(AppError::bad_request(anyhow::anyhow!(
            "permission at position {} is blank",
            index
        ))),
        None => Ok(()),
    }
}

/// Fails with [`ROLE_EXISTS`] if another record already uses `role_name`.
/// `owner` is the record being renamed, which may keep its own name.
pub async fn ensure_name_available(
    store: &dyn CredentialStore,
    role_name: &str,
    owner: Option<RoleId>,
) -> Result<(), AppError> {
    match store.find_by_role_name(role_name).await? {
        Some(existing) if Some(existing.id) != owner => {
            Err(AppError::bad_request(anyhow::anyhow!(ROLE_EXISTS)))
        }
        _ => Ok(()),
    }
}

/// Stores a new Credential Record with its password encoded by `verifier`.
///
/// Uniqueness is a pre-check, so two concurrent creates of the same name can
/// both succeed.
pub async fn create_role(
    store: &dyn CredentialStore,
    verifier: &dyn CredentialVerifier,
    role_name: &str,
    password: &str,
    permissions: Vec<String>,
) -> Result<CredentialRecord, AppError> {
    let role_name = normalize_role_name(role_name)?;
    if password.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(PASSWORD_EMPTY)));
    }
    check_permissions(&permissions)?;
    ensure_name_available(store, role_name, None).await?;

    let record = CredentialRecord::new(role_name, verifier.encode(password)?, permissions);
    store.insert(&record).await?;

    tracing::info!(role_id = %record.id, role_name = %record.role_name, "Role created");
    Ok(record)
}
