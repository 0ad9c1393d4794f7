use async_trait::async_trait;

use crate::error::SQLError;

/// SQLConnection is a handle to the target database, used to check statements
/// without running them.
#[async_trait]
pub trait SQLConnection: Send + Sync {
    /// Ask the database to prepare (parse) `sql` without executing it.
    ///
    /// The prepared handle is released before this returns, on success and on
    /// failure alike. A rejected statement is reported as `SQLError::Query`
    /// carrying the database's diagnostic.
    async fn prepare(&self, sql: &str) -> Result<(), SQLError>;

    /// Short name of the SQL dialect this connection speaks.
    fn dialect(&self) -> &'static str;
}
