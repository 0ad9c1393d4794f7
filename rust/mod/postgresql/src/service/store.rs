use std::sync::Arc;

use tracing::debug;

use dbcred_kv::KVStore;

use crate::model::{RoleEntry, RoleName};
use crate::service::RoleError;

/// Key prefix for role records: `role/{name}`.
pub const ROLE_PREFIX: &str = "role/";

/// RoleStore owns the persisted role records. It never looks at the SQL.
pub struct RoleStore {
    kv: Arc<dyn KVStore>,
}

impl RoleStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    fn key(name: &RoleName) -> String {
        format!("{}{}", ROLE_PREFIX, name)
    }

    /// Load a role. `Ok(None)` when nothing is stored under `name`; a record
    /// that exists but does not decode is a storage error.
    pub fn get(&self, name: &RoleName) -> Result<Option<RoleEntry>, RoleError> {
        let key = Self::key(name);
        match self.kv.get(&key)? {
            Some(bytes) => {
                let entry: RoleEntry = serde_json::from_slice(&bytes).map_err(|e| {
                    RoleError::Storage(format!("decode {}: {}", key, e))
                })?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Write a role, replacing whatever was stored under the name.
    pub fn put(&self, name: &RoleName, entry: &RoleEntry) -> Result<(), RoleError> {
        let key = Self::key(name);
        let bytes = serde_json::to_vec(entry)
            .map_err(|e| RoleError::Storage(format!("encode {}: {}", key, e)))?;
        self.kv.set(&key, &bytes)?;
        debug!(key = %key, "role record written");
        Ok(())
    }

    /// Remove a role. Missing roles are fine.
    pub fn delete(&self, name: &RoleName) -> Result<(), RoleError> {
        self.kv.delete(&Self::key(name))?;
        Ok(())
    }

    /// Names of all stored roles, sorted.
    pub fn list(&self) -> Result<Vec<String>, RoleError> {
        let entries = self.kv.scan(ROLE_PREFIX)?;
        Ok(entries
            .into_iter()
            .filter_map(|(key, _)| key.strip_prefix(ROLE_PREFIX).map(str::to_string))
            .collect())
    }
}
