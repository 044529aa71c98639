use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Client as MongoClient, Collection, Database, IndexModel,
    bson::{Document, doc, to_bson},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};

use tavern_core::AppError;
use tavern_models::{CredentialRecord, RoleId};

use crate::store::{CredentialStore, RoleChanges};

const ROLES_COLLECTION: &str = "roles";

fn db_error(context: &str, e: mongodb::error::Error) -> AppError {
    tracing::error!("{}: {}", context, e);
    AppError::database(anyhow::anyhow!("{}: {}", context, e))
}

#[derive(Clone)]
pub struct MongoCredentialStore {
    client: MongoClient,
    db: Database,
}

impl MongoCredentialStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri)
            .await
            .map_err(|e| db_error("Failed to connect to MongoDB", e))?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Lookup index for login. Not unique: uniqueness of role names is a
    /// pre-check in the role service.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        let role_name_index = IndexModel::builder()
            .keys(doc! { "roleName": 1 })
            .options(
                IndexOptions::builder()
                    .name("role_name_idx".to_string())
                    .build(),
            )
            .build();

        self.roles()
            .create_index(role_name_index, None)
            .await
            .map_err(|e| db_error("Failed to create roleName index", e))?;

        tracing::info!("MongoDB indexes ready");
        Ok(())
    }

    fn roles(&self) -> Collection<CredentialRecord> {
        self.db.collection(ROLES_COLLECTION)
    }
}

fn by_id(id: RoleId) -> Document {
    doc! { "_id": id.to_string() }
}

fn set_document(changes: RoleChanges) -> Result<Document, AppError> {
    let mut set = doc! {
        "updatedAt": to_bson(&Utc::now()).map_err(AppError::internal)?,
    };
    if let Some(role_name) = changes.role_name {
        set.insert("roleName", role_name);
    }
    if let Some(password) = changes.password {
        set.insert("password", password);
    }
    if let Some(permissions) = changes.permissions {
        set.insert("permissions", permissions);
    }
    Ok(doc! { "$set": set })
}

#[async_trait]
impl CredentialStore for MongoCredentialStore {
    async fn insert(&self, record: &CredentialRecord) -> Result<(), AppError> {
        self.roles()
            .insert_one(record, None)
            .await
            .map_err(|e| db_error("Failed to insert role", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<CredentialRecord>, AppError> {
        self.roles()
            .find_one(by_id(id), None)
            .await
            .map_err(|e| db_error("Failed to find role", e))
    }

    async fn find_by_role_name(
        &self,
        role_name: &str,
    ) -> Result<Option<CredentialRecord>, AppError> {
        self.roles()
            .find_one(doc! { "roleName": role_name }, None)
            .await
            .map_err(|e| db_error("Failed to find role by name", e))
    }

    async fn list(&self) -> Result<Vec<CredentialRecord>, AppError> {
        let options = FindOptions::builder().sort(doc! { "roleName": 1 }).build();
        let cursor = self
            .roles()
            .find(None, options)
            .await
            .map_err(|e| db_error("Failed to list roles", e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| db_error("Failed to read roles cursor", e))
    }

    async fn update(
        &self,
        id: RoleId,
        changes: RoleChanges,
    ) -> Result<Option<CredentialRecord>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.roles()
            .find_one_and_update(by_id(id), set_document(changes)?, options)
            .await
            .map_err(|e| db_error("Failed to update role", e))
    }

    async fn delete(&self, id: RoleId) -> Result<bool, AppError> {
        let result = self
            .roles()
            .delete_one(by_id(id), None)
            .await
            .map_err(|e| db_error("Failed to delete role", e))?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| db_error("MongoDB health check failed", e))?;
        Ok(())
    }
}
