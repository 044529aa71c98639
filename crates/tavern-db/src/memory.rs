use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tavern_core::AppError;
use tavern_models::{CredentialRecord, RoleId};

use crate::store::{CredentialStore, RoleChanges};

/// In-process credential store. Records are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<RoleId, CredentialRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|r| (r.id, r)).collect()),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn insert(&self, record: &CredentialRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::database(anyhow::anyhow!(
                "duplicate key: {}",
                record.id
            )));
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<CredentialRecord>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_role_name(
        &self,
        role_name: &str,
    ) -> Result<Option<CredentialRecord>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.role_name == role_name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<CredentialRecord>, AppError> {
        let mut all: Vec<_> = self.records.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.role_name.cmp(&b.role_name));
        Ok(all)
    }

    async fn update(
        &self,
        id: RoleId,
        changes: RoleChanges,
    ) -> Result<Option<CredentialRecord>, AppError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(role_name) = changes.role_name {
            record.role_name = role_name;
        }
        if let Some(password) = changes.password {
            record.password = password;
        }
        if let Some(permissions) = changes.permissions {
            record.permissions = permissions;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: RoleId) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
