use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Connection, Executor};
use tracing::{debug, warn};

use crate::error::SQLError;
use crate::traits::SQLConnection;

/// Connection pool settings for [`PostgresStore`].
#[derive(Debug, Clone)]
pub struct PostgresOptions {
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long to wait for a pooled connection before giving up.
    pub acquire_timeout: Duration,
    /// How long a single prepare round-trip may take.
    pub prepare_timeout: Duration,
}

impl Default for PostgresOptions {
    fn default() -> Self {
        Self {
            max_connections: 4,
            acquire_timeout: Duration::from_secs(5),
            prepare_timeout: Duration::from_secs(5),
        }
    }
}

/// PostgresStore is a SQLConnection backed by a sqlx Postgres pool.
///
/// `prepare` sends a protocol-level Parse/Describe, which works for utility
/// statements such as `CREATE ROLE` and never runs them. The server-side
/// statement is closed before the connection goes back to the pool.
pub struct PostgresStore {
    pool: PgPool,
    prepare_timeout: Duration,
}

impl PostgresStore {
    /// Build a pool for `url`. No connection is opened until first use.
    pub fn connect_lazy(url: &str, options: PostgresOptions) -> Result<Self, SQLError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_lazy(url)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            prepare_timeout: options.prepare_timeout,
        })
    }
}

/// SQLSTATE classes that describe the session rather than the statement:
/// 08 (connection exception) and 57 (operator intervention).
fn is_connection_state(code: Option<&str>) -> bool {
    code.is_some_and(|c| c.starts_with("08") || c.starts_with("57"))
}

/// Split an error from the prepare round-trip into "the server refused this
/// statement" and "we never got an answer".
fn classify(e: sqlx::Error) -> SQLError {
    match e {
        sqlx::Error::Database(db_err) if !is_connection_state(db_err.code().as_deref()) => {
            SQLError::Query(db_err.to_string())
        }
        other => SQLError::Connection(other.to_string()),
    }
}

#[async_trait]
impl SQLConnection for PostgresStore {
    async fn prepare(&self, sql: &str) -> Result<(), SQLError> {
        // Login and pool errors are never about the statement, even when the
        // server reported them.
        let mut conn = self.pool.acquire().await.map_err(|e| {
            warn!(error = %e, "postgres: failed to acquire connection");
            SQLError::Connection(e.to_string())
        })?;

        let parsed = tokio::time::timeout(self.prepare_timeout, (&mut *conn).prepare(sql)).await;
        let result = match parsed {
            Ok(Ok(_statement)) => Ok(()),
            Ok(Err(e)) => Err(classify(e)),
            Err(_) => {
                // The protocol state is unknown mid-round-trip; never reuse it.
                conn.close_on_drop();
                warn!(timeout = ?self.prepare_timeout, "postgres: prepare timed out");
                return Err(SQLError::Connection(format!(
                    "prepare timed out after {:?}",
                    self.prepare_timeout
                )));
            }
        };

        // Deallocate the named statement sqlx cached for this connection.
        if let Err(e) = conn.clear_cached_statements().await {
            conn.close_on_drop();
            warn!(error = %e, "postgres: failed to release prepared statement");
            return result.and(Err(classify(e)));
        }

        debug!(ok = result.is_ok(), "postgres: prepare finished");
        result
    }

    fn dialect(&self) -> &'static str {
        "postgres"
    }
}
