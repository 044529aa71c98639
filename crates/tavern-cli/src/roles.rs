use tavern_core::{AppError, permissions};
use tavern_db::CredentialStore;
use tavern_models::CredentialRecord;

pub use tavern_db::roles::create_role;

/// Splits a comma separated permission list, dropping empty entries.
pub fn parse_permissions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Permission names in `permissions` that are not in the catalog.
pub fn unknown_permissions(permissions: &[String]) -> Vec<&str> {
    permissions
        .iter()
        .map(String::as_str)
        .filter(|p| !permissions::is_known(p))
        .collect()
}

pub async fn list_roles(store: &dyn CredentialStore) -> Result<Vec<CredentialRecord>, AppError> {
    store.list().await
}

pub async fn delete_role(store: &dyn CredentialStore, role_name: &str) -> Result<(), AppError> {
    let record = store
        .find_by_role_name(role_name)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("role not found")))?;
    store.delete(record.id).await?;
    Ok(())
}
