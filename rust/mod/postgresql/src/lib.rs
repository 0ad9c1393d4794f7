//! PostgreSQL role module — named SQL templates for dynamic database logins.
//!
//! # Resources
//!
//! - **Role** — a name plus the SQL statement used to create a login,
//!   with `{{name}}`, `{{password}}` and `{{expiration}}` placeholders
//!
//! A role is only stored after its statement, rendered with test values,
//! has been prepared (parsed, never run) by the configured database.
//!
//! # Usage
//!
//! ```ignore
//! use postgresql::PostgresqlModule;
//!
//! let module = PostgresqlModule::new(kv, db);
//! let router = module.routes(); // Mount under /postgresql
//! ```

pub mod api;
pub mod help;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use dbcred_core::Module;
use dbcred_kv::KVStore;
use dbcred_sql::SQLConnection;

use crate::service::PostgresqlService;

/// Role module implementing the Module trait.
pub struct PostgresqlModule {
    service: Arc<PostgresqlService>,
}

impl PostgresqlModule {
    pub fn new(kv: Arc<dyn KVStore>, db: Arc<dyn SQLConnection>) -> Self {
        Self {
            service: PostgresqlService::new(kv, db),
        }
    }
}

impl Module for PostgresqlModule {
    fn name(&self) -> &str {
        "postgresql"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
