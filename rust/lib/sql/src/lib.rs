pub mod error;
pub mod postgres;
pub mod sqlite;
pub mod traits;

pub use error::SQLError;
pub use postgres::{PostgresOptions, PostgresStore};
pub use sqlite::SqliteStore;
pub use traits::SQLConnection;
