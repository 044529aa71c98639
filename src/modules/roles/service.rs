use tracing::instrument;

use tavern_core::{AppError, CredentialVerifier, permissions};
use tavern_db::roles::{check_permissions, ensure_name_available, normalize_role_name};
use tavern_db::{CredentialStore, RoleChanges};
use tavern_models::{CreateRoleDto, PermissionCatalogResponse, RoleId, RoleResponse, UpdateRoleDto};

pub use tavern_db::roles::ROLE_EXISTS;

pub const ROLE_NOT_FOUND: &str = "role not found";

pub fn parse_role_id(raw: &str) -> Result<RoleId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("invalid role id")))
}

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(ROLE_NOT_FOUND))
}

pub fn permission_catalog() -> PermissionCatalogResponse {
    PermissionCatalogResponse {
        permissions: permissions::catalog().to_vec(),
    }
}

#[instrument(skip_all)]
pub async fn list_roles(store: &dyn CredentialStore) -> Result<Vec<RoleResponse>, AppError> {
    let records = store.list().await?;
    Ok(records.into_iter().map(RoleResponse::from).collect())
}

#[instrument(skip(store))]
pub async fn get_role(store: &dyn CredentialStore, id: RoleId) -> Result<RoleResponse, AppError> {
    store
        .find_by_id(id)
        .await?
        .map(RoleResponse::from)
        .ok_or_else(not_found)
}

#[instrument(skip_all, fields(role_name = %dto.role_name))]
pub async fn create_role(
    store: &dyn CredentialStore,
    verifier: &dyn CredentialVerifier,
    dto: CreateRoleDto,
) -> Result<RoleResponse, AppError> {
    let record = tavern_db::roles::create_role(
        store,
        verifier,
        &dto.role_name,
        &dto.password,
        dto.permissions,
    )
    .await?;

    Ok(RoleResponse::from(record))
}

/// Replaces each provided field wholesale. Concurrent updates are
/// last-write-wins.
#[instrument(skip(store, verifier, dto))]
pub async fn update_role(
    store: &dyn CredentialStore,
    verifier: &dyn CredentialVerifier,
    id: RoleId,
    dto: UpdateRoleDto,
) -> Result<RoleResponse, AppError> {
    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("no fields to update")));
    }
    if let Some(permissions) = &dto.permissions {
        check_permissions(permissions)?;
    }
    let role_name = match dto.role_name.as_deref() {
        Some(raw) => {
            let role_name = normalize_role_name(raw)?;
            ensure_name_available(store, role_name, Some(id)).await?;
            Some(role_name.to_string())
        }
        None => None,
    };

    let password = dto
        .password
        .as_deref()
        .map(|raw| verifier.encode(raw))
        .transpose()?;

    let changes = RoleChanges {
        role_name,
        password,
        permissions: dto.permissions,
    };

    let record = store.update(id, changes).await?.ok_or_else(not_found)?;
    tracing::info!(role_id = %record.id, "Role updated");
    Ok(RoleResponse::from(record))
}

#[instrument(skip(store))]
pub async fn delete_role(store: &dyn CredentialStore, id: RoleId) -> Result<(), AppError> {
    if !store.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(role_id = %id, "Role deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tavern_core::{BcryptVerifier, PlaintextVerifier};
    use tavern_db::MemoryCredentialStore;

    fn create_dto(role_name: &str, permissions: &[&str]) -> CreateRoleDto {
        CreateRoleDto {
            role_name: role_name.to_string(),
            password: "secret".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_role_id() {
        assert!(parse_role_id("00000000-0000-0000-0000-000000000001").is_ok());
        let err = parse_role_id("42").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_and_blank_permission() {
        let store = MemoryCredentialStore::new();
        create_role(&store, &PlaintextVerifier, create_dto("editor", &["AddEvents"]))
            .await
            .unwrap();

        let err = create_role(&store, &PlaintextVerifier, create_dto("editor", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), ROLE_EXISTS);

        let err = create_role(&store, &PlaintextVerifier, create_dto("other", &["AddEvents", " "]))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_encodes_password() {
        let store = MemoryCredentialStore::new();
        let verifier = BcryptVerifier::new(4);
        let role = create_role(&store, &verifier, create_dto("editor", &[]))
            .await
            .unwrap();

        let stored = store.find_by_id(role.id).await.unwrap().unwrap();
        assert_ne!(stored.password, "secret");
        assert!(verifier.verify("secret", &stored.password));
    }

    #[tokio::test]
    async fn test_update_rename_conflict() {
        let store = MemoryCredentialStore::new();
        let editor = create_role(&store, &PlaintextVerifier, create_dto("editor", &[]))
            .await
            .unwrap();
        create_role(&store, &PlaintextVerifier, create_dto("waiter", &[]))
            .await
            .unwrap();

        let dto = UpdateRoleDto {
            role_name: Some("waiter".into()),
            ..Default::default()
        };
        let err = update_role(&store, &PlaintextVerifier, editor.id, dto)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), ROLE_EXISTS);

        // Renaming to its own name is not a conflict.
        let dto = UpdateRoleDto {
            role_name: Some("editor".into()),
            ..Default::default()
        };
        assert!(update_role(&store, &PlaintextVerifier, editor.id, dto).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = MemoryCredentialStore::new();
        let dto = UpdateRoleDto {
            permissions: Some(vec![]),
            ..Default::default()
        };

        let err = update_role(&store, &PlaintextVerifier, RoleId::new(), dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = delete_role(&store, RoleId::new()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_body() {
        let store = MemoryCredentialStore::new();
        let err = update_role(&store, &PlaintextVerifier, RoleId::new(), UpdateRoleDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_permission_catalog_lists_manage_roles() {
        let catalog = permission_catalog();
        assert!(catalog.permissions.iter().any(|p| p.name == "ManageRoles"));
    }
}
