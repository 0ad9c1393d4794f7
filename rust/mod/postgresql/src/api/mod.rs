mod help;
mod roles;

use std::sync::Arc;

use axum::Router;

use crate::service::PostgresqlService;

/// Shared application state.
pub type AppState = Arc<PostgresqlService>;

/// Build the module's API router.
///
/// All routes are relative; the caller nests them under `/postgresql`.
pub fn build_router(svc: Arc<PostgresqlService>) -> Router {
    Router::new()
        .merge(roles::routes())
        .merge(help::routes())
        .with_state(svc)
}
