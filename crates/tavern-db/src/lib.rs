//! # Tavern DB
//!
//! Credential Record storage for the Tavern API.
//!
//! - [`store`]: The [`CredentialStore`] trait every backend implements
//! - [`mongo`]: MongoDB backend (`roles` collection)
//! - [`memory`]: In-process backend for local runs and tests
//! - [`roles`]: Role creation and naming rules shared by the API and CLI
//!
//! # Example
//!
//! ```ignore
//! use tavern_config::DatabaseConfig;
//! use tavern_db::connect_store;
//!
//! let store = connect_store(&DatabaseConfig::from_env()?).await?;
//! let editor = store.find_by_role_name("editor").await?;
//! ```

pub mod memory;
pub mod mongo;
pub mod roles;
pub mod store;

use std::sync::Arc;

use tavern_config::DatabaseConfig;
use tavern_core::AppError;

pub use memory::MemoryCredentialStore;
pub use mongo::MongoCredentialStore;
pub use store::{CredentialStore, RoleChanges};

/// Opens the configured backend. For MongoDB this connects and makes sure the
/// lookup index exists.
///
/// # Errors
///
/// Returns a database error if the connection or index creation fails.
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn CredentialStore>, AppError> {
    match config {
        DatabaseConfig::Mongo { uri, database } => {
            let store = MongoCredentialStore::connect(uri, database).await?;
            store.initialize_indexes().await?;
            Ok(Arc::new(store))
        }
        DatabaseConfig::Memory => {
            tracing::warn!("Using in-memory credential store; records will not persist");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}
