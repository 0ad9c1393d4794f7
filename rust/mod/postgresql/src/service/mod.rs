pub mod role;
pub mod store;
pub mod template;

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use dbcred_kv::{KVError, KVStore};
use dbcred_sql::SQLConnection;

pub use store::RoleStore;

/// Role service error type.
#[derive(Debug, Error)]
pub enum RoleError {
    /// The storage medium failed, or a stored record could not be decoded.
    #[error("storage: {0}")]
    Storage(String),

    /// The rendered template was refused by the database.
    #[error("Error testing query: {0}")]
    Validation(String),

    /// The request itself is malformed (bad name, empty sql).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The database could not be reached to test the template.
    #[error("database unavailable: {0}")]
    Database(String),
}

impl From<KVError> for RoleError {
    fn from(e: KVError) -> Self {
        RoleError::Storage(e.to_string())
    }
}

impl From<RoleError> for dbcred_core::ServiceError {
    fn from(e: RoleError) -> Self {
        match e {
            RoleError::Validation(_) | RoleError::InvalidRequest(_) => {
                dbcred_core::ServiceError::Validation(e.to_string())
            }
            RoleError::Storage(detail) => {
                error!(error = %detail, "role storage operation failed");
                dbcred_core::ServiceError::Storage(
                    "the role operation could not be completed".into(),
                )
            }
            RoleError::Database(detail) => {
                error!(error = %detail, "database unavailable for role validation");
                dbcred_core::ServiceError::Internal(
                    "the database could not be reached to test the role".into(),
                )
            }
        }
    }
}

/// The role service: a Role Store plus the connection templates are tested
/// against.
///
/// Holds no per-request state; every call stands alone.
pub struct PostgresqlService {
    pub(crate) roles: RoleStore,
    pub(crate) db: Arc<dyn SQLConnection>,
}

impl PostgresqlService {
    pub fn new(kv: Arc<dyn KVStore>, db: Arc<dyn SQLConnection>) -> Arc<Self> {
        Arc::new(Self {
            roles: RoleStore::new(kv),
            db,
        })
    }
}
