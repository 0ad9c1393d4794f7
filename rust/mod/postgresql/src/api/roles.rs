use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use dbcred_core::ServiceError;

use crate::api::AppState;
use crate::model::{RoleName, WriteRole};

pub fn routes() -> Router<AppState> {
    Router::new().route("/roles", get(list_roles)).route(
        "/roles/{name}",
        get(read_role)
            .put(write_role)
            .post(write_role)
            .delete(delete_role),
    )
}

async fn list_roles(State(svc): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let keys = svc.list_roles()?;
    Ok(Json(serde_json::json!({ "keys": keys })))
}

async fn read_role(
    State(svc): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let name = RoleName::parse(&name)?;
    match svc.read_role(&name)? {
        Some(entry) => Ok(Json(serde_json::json!({ "sql": entry.sql }))),
        None => Err(ServiceError::NotFound(format!("role '{}' not found", name))),
    }
}

async fn write_role(
    State(svc): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<WriteRole>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let name = RoleName::parse(&name)?;
    let Json(input) = body.map_err(|e| ServiceError::Validation(e.body_text()))?;
    let sql = input.into_template()?;

    svc.create_role(&name, sql).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_role(
    State(svc): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let name = RoleName::parse(&name)?;
    svc.delete_role(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use dbcred_kv::MemoryStore;
    use dbcred_sql::SqliteStore;

    use super::*;
    use crate::api::build_router;
    use crate::service::PostgresqlService;

    fn make_router() -> Router {
        let kv = Arc::new(MemoryStore::new());
        let db = Arc::new(SqliteStore::open_in_memory().unwrap());
        build_router(PostgresqlService::new(kv, db))
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        let req = builder.body(body).unwrap();

        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null))
        };
        (status, json)
    }

    const SQL: &str = r#"{"sql": "CREATE TABLE \"{{name}}\" (pw TEXT DEFAULT '{{password}}')"}"#;

    #[tokio::test]
    async fn write_read_delete_cycle() {
        let router = make_router();

        let (s, _) = call(&router, "PUT", "/roles/readonly", Some(SQL)).await;
        assert_eq!(s, StatusCode::NO_CONTENT);

        let (s, json) = call(&router, "GET", "/roles/readonly", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(json["sql"], "CREATE TABLE \"{{name}}\" (pw TEXT DEFAULT '{{password}}')");

        let (s, _) = call(&router, "DELETE", "/roles/readonly", None).await;
        assert_eq!(s, StatusCode::NO_CONTENT);

        let (s, json) = call(&router, "GET", "/roles/readonly", None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn post_also_writes() {
        let router = make_router();
        let (s, _) = call(&router, "POST", "/roles/viapost", Some(SQL)).await;
        assert_eq!(s, StatusCode::NO_CONTENT);

        let (s, _) = call(&router, "GET", "/roles/viapost", None).await;
        assert_eq!(s, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_sql_is_rejected_with_database_message() {
        let router = make_router();

        let (s, json) = call(
            &router,
            "PUT",
            "/roles/bad",
            Some(r#"{"sql": "CREATE TABL {{name}}"}"#),
        )
        .await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_FAILED");
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Error testing query: "), "got: {message}");
        assert!(message.contains("syntax error"), "got: {message}");

        let (s, _) = call(&router, "GET", "/roles/bad", None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_missing_role_succeeds() {
        let router = make_router();
        let (s, _) = call(&router, "DELETE", "/roles/never_written", None).await;
        assert_eq!(s, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let router = make_router();
        let (s, json) = call(&router, "PUT", "/roles/read-only", Some(SQL)).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_FAILED");

        let (s, _) = call(&router, "GET", "/roles/read-only", None).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_or_blank_sql_is_rejected() {
        let router = make_router();

        let (s, json) = call(&router, "PUT", "/roles/empty", Some(r#"{}"#)).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_FAILED");

        let (s, _) = call(&router, "PUT", "/roles/empty", Some(r#"{"sql": "   "}"#)).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);

        let (s, _) = call(&router, "PUT", "/roles/empty", Some("not json")).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_returns_sorted_keys() {
        let router = make_router();
        call(&router, "PUT", "/roles/zeta", Some(SQL)).await;
        call(&router, "PUT", "/roles/alpha", Some(SQL)).await;

        let (s, json) = call(&router, "GET", "/roles", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(json["keys"], serde_json::json!(["alpha", "zeta"]));
    }

    #[tokio::test]
    async fn help_endpoint() {
        let router = make_router();
        let (s, json) = call(&router, "GET", "/help/roles", None).await;
        assert_eq!(s, StatusCode::OK);
        assert!(json["description"].as_str().unwrap().contains("{{password}}"));
        assert!(!json["synopsis"].as_str().unwrap().is_empty());
    }
}
