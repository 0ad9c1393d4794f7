//! Bootstrap — config checks and storage/database initialization.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use dbcred_core::ServiceConfig;
use dbcred_kv::{KVStore, MemoryStore, RedbStore};
use dbcred_sql::{PostgresOptions, PostgresStore, SQLConnection, SqliteStore};

use crate::config::{Driver, ServerConfig, StorageBackend};

/// Refuse to start on a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.database.url.is_empty() {
        anyhow::bail!("Database url is empty in configuration.");
    }
    if config.database.max_connections == 0 {
        anyhow::bail!("Database max_connections must be at least 1.");
    }
    if config.database.connect_timeout_secs == 0 || config.database.prepare_timeout_secs == 0 {
        anyhow::bail!("Database timeouts must be at least 1 second.");
    }
    Ok(())
}

/// Translate the server config into the shared service config.
pub fn service_config(config: &ServerConfig, listen: &str) -> ServiceConfig {
    ServiceConfig {
        data_dir: Some(PathBuf::from(&config.storage.data_dir)),
        db_path: config.storage.db_path.as_ref().map(PathBuf::from),
        listen: listen.to_string(),
    }
}

/// Open the KV medium for role records.
pub fn open_kv(
    backend: StorageBackend,
    service: &ServiceConfig,
) -> anyhow::Result<Arc<dyn KVStore>> {
    match backend {
        StorageBackend::Redb => {
            if let Some(dir) = &service.data_dir {
                std::fs::create_dir_all(dir)?;
            }
            let path = service.resolve_db_path();
            let store = RedbStore::open(&path)
                .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?;
            info!("KV store opened at {}", path.display());
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("KV store is in-memory; roles will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Open the connection role templates are tested against.
///
/// Postgres pools are lazy: the server starts even if the database is down,
/// and role writes fail until it is reachable.
pub fn open_db(config: &ServerConfig) -> anyhow::Result<Arc<dyn SQLConnection>> {
    let db = &config.database;
    match db.driver {
        Driver::Postgres => {
            let store = PostgresStore::connect_lazy(
                &db.url,
                PostgresOptions {
                    max_connections: db.max_connections,
                    acquire_timeout: db.connect_timeout(),
                    prepare_timeout: db.prepare_timeout(),
                },
            )
            .map_err(|e| anyhow::anyhow!("failed to configure postgres: {}", e))?;
            info!("Templates are tested against postgres");
            Ok(Arc::new(store))
        }
        Driver::Sqlite => {
            let store = SqliteStore::open(Path::new(&db.url))
                .map_err(|e| anyhow::anyhow!("failed to open sqlite: {}", e))?;
            info!("Templates are tested against sqlite at {}", db.url);
            Ok(Arc::new(store))
        }
    }
}
