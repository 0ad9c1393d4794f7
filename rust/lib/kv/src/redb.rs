use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

fn storage_err(e: impl std::fmt::Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust embedded
/// key-value database. Every write is its own committed transaction, so a
/// reader never observes a half-written value.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage_err)?;

        // Ensure the table exists so the first read does not fail.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        debug!("RedbStore: opened {:?}", path);
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        let value = table.get(key).map_err(storage_err)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(storage_err)? {
            let (key, value) = entry.map_err(storage_err)?;
            let key = key.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, value.value().to_vec()));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_tmp() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_set_get_delete() {
        let (store, _dir) = open_tmp();

        assert!(store.get("role/a").unwrap().is_none());

        store.set("role/a", b"one").unwrap();
        assert_eq!(store.get("role/a").unwrap(), Some(b"one".to_vec()));

        store.set("role/a", b"two").unwrap();
        assert_eq!(store.get("role/a").unwrap(), Some(b"two".to_vec()));

        store.delete("role/a").unwrap();
        assert!(store.get("role/a").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let (store, _dir) = open_tmp();
        store.delete("role/never").unwrap();
    }

    #[test]
    fn test_scan_prefix() {
        let (store, _dir) = open_tmp();
        store.set("role/b", b"2").unwrap();
        store.set("role/a", b"1").unwrap();
        store.set("config/connection", b"x").unwrap();
        store.set("rolex", b"y").unwrap();

        let entries = store.scan("role/").unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["role/a", "role/b"]);
    }

    #[test]
    fn test_reopen_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("role/keep", b"sql").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("role/keep").unwrap(), Some(b"sql".to_vec()));
    }
}
