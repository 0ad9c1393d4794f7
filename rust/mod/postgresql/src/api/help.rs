use axum::routing::get;
use axum::{Json, Router};

use crate::api::AppState;
use crate::help::{ROLE_HELP_DESCRIPTION, ROLE_HELP_SYNOPSIS};

pub fn routes() -> Router<AppState> {
    Router::new().route("/help/roles", get(role_help))
}

async fn role_help() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "synopsis": ROLE_HELP_SYNOPSIS,
        "description": ROLE_HELP_DESCRIPTION,
    }))
}
