mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{FailingStore, body_json, empty_request, jwt_config, record, setup_app, test_state};
use tavern::middleware::auth::{CurrentRole, require_authentication};
use tavern::middleware::permission::{require_add_events, require_manage_gallery};
use tavern::state::AppState;
use tavern_auth::{SessionClaims, create_session_token, encode_claims};
use tavern_config::{AppEnvironment, JwtConfig};
use tavern_core::PlaintextVerifier;
use tavern_db::{CredentialStore, MemoryCredentialStore, RoleChanges};
use tavern_models::{CredentialRecord, RoleId};

async fn whoami(CurrentRole(role): CurrentRole) -> Json<Value> {
    Json(json!({ "roleName": role.role_name }))
}

/// Stand-ins for content routes guarded the way the real ones are.
fn guarded_router(state: AppState) -> Router {
    let events = Router::new()
        .route("/events", post(whoami))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_add_events));
    let gallery = Router::new()
        .route("/gallery", post(whoami))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_manage_gallery));
    let authenticated = Router::new()
        .route("/private", get(whoami))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_authentication));

    Router::new()
        .merge(events)
        .merge(gallery)
        .merge(authenticated)
        .route("/unguarded", get(whoami))
        .with_state(state)
}

fn guarded_app(records: Vec<CredentialRecord>) -> (Router, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::with_records(records));
    let state = test_state(
        store.clone(),
        Arc::new(PlaintextVerifier),
        AppEnvironment::Development,
    );
    (guarded_router(state), store)
}

fn cookie_for(token: &str) -> String {
    format!("token={}", token)
}

async fn call(router: &Router, method: &str, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(empty_request(method, uri, cookie))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn test_editor_scenario() {
    let app = setup_app(vec![record("editor", "p1", &["AddEvents"])]);
    let cookie = app.login("editor", "p1").await;
    let router = guarded_router(app.state.clone());

    let (status, body) = call(&router, "POST", "/events", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roleName"], "editor");

    let (status, body) = call(&router, "POST", "/gallery", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "access denied. missing required permission: ManageGallery"
    );
}

#[tokio::test]
async fn test_no_cookie_is_unauthorized() {
    let (router, _) = guarded_app(vec![record("editor", "p1", &["AddEvents"])]);

    for (method, uri) in [("GET", "/private"), ("POST", "/events")] {
        let (status, body) = call(&router, method, uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "no token provided");
    }
}

#[tokio::test]
async fn test_tampered_or_foreign_tokens_are_unauthorized() {
    let editor = record("editor", "p1", &["AddEvents"]);
    let (router, _) = guarded_app(vec![editor.clone()]);

    let foreign = create_session_token(&editor.id.to_string(), &JwtConfig::new("other-secret"))
        .unwrap();
    let valid = create_session_token(&editor.id.to_string(), &jwt_config()).unwrap();
    let tampered = format!("{}x", valid);

    for token in [foreign.as_str(), tampered.as_str(), "not.a.jwt", "garbage"] {
        for (method, uri) in [("GET", "/private"), ("POST", "/events")] {
            let (status, body) = call(&router, method, uri, Some(&cookie_for(token))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} with {}", uri, token);
            assert_eq!(body["error"], "invalid token");
        }
    }
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let editor = record("editor", "p1", &["AddEvents"]);
    let (router, _) = guarded_app(vec![editor.clone()]);

    // Issued two days ago with a one-day lifetime.
    let issued_at = Utc::now().timestamp() - 2 * 86_400;
    let claims = SessionClaims::new(editor.id.to_string(), issued_at, 86_400);
    let token = encode_claims(&claims, &jwt_config()).unwrap();

    let (status, body) = call(&router, "POST", "/events", Some(&cookie_for(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token");
}

#[tokio::test]
async fn test_token_without_subject_is_unauthorized() {
    let (router, _) = guarded_app(vec![record("editor", "p1", &["AddEvents"])]);

    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: None,
        iat: now,
        exp: now + 3600,
    };
    let token = encode_claims(&claims, &jwt_config()).unwrap();

    for (method, uri) in [("GET", "/private"), ("POST", "/events")] {
        let (status, body) = call(&router, method, uri, Some(&cookie_for(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "invalid token");
    }
}

#[tokio::test]
async fn test_deleted_role_is_rejected() {
    let editor = record("editor", "p1", &["AddEvents"]);
    let (router, store) = guarded_app(vec![editor.clone()]);
    let token = create_session_token(&editor.id.to_string(), &jwt_config()).unwrap();
    let cookie = cookie_for(&token);

    store.delete(editor.id).await.unwrap();

    let (status, body) = call(&router, "GET", "/private", Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token");

    let (status, _) = call(&router, "POST", "/events", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_permission_set_is_forbidden_everywhere() {
    let guest = record("guest", "p1", &[]);
    let (router, _) = guarded_app(vec![guest.clone()]);
    let token = create_session_token(&guest.id.to_string(), &jwt_config()).unwrap();
    let cookie = cookie_for(&token);

    let (status, _) = call(&router, "GET", "/private", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/events", "/gallery"] {
        let (status, _) = call(&router, "POST", uri, Some(&cookie)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn test_revoked_permission_takes_effect_immediately() {
    let editor = record("editor", "p1", &["AddEvents"]);
    let (router, store) = guarded_app(vec![editor.clone()]);
    let token = create_session_token(&editor.id.to_string(), &jwt_config()).unwrap();
    let cookie = cookie_for(&token);

    let (status, _) = call(&router, "POST", "/events", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    store
        .update(
            editor.id,
            RoleChanges {
                permissions: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (status, _) = call(&router, "POST", "/events", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_current_role_outside_guard_is_unauthorized() {
    let (router, _) = guarded_app(vec![]);

    let (status, _) = call(&router, "GET", "/unguarded", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error_without_detail() {
    let state = AppState::new(
        Arc::new(FailingStore),
        Arc::new(PlaintextVerifier),
        jwt_config(),
        AppEnvironment::Development,
    );
    let router = guarded_router(state);
    let token = create_session_token(&RoleId::new().to_string(), &jwt_config()).unwrap();

    for (method, uri) in [("GET", "/private"), ("POST", "/events")] {
        let (status, body) = call(&router, method, uri, Some(&cookie_for(&token))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body["error"], "internal server error");
    }
}
