use crate::error::KVError;

/// KVStore is the durable key-value medium behind every stored record.
///
/// Keys are namespaced by a slash-separated prefix, e.g. `role/readonly`.
/// Each call is atomic on its own; there are no cross-key transactions and
/// concurrent writers to one key resolve as last-writer-wins.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
