#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tavern::router::init_router;
use tavern::state::AppState;
use tavern_config::{AppEnvironment, JwtConfig};
use tavern_core::{AppError, CredentialVerifier, PlaintextVerifier};
use tavern_db::{CredentialStore, MemoryCredentialStore, RoleChanges};
use tavern_models::{CredentialRecord, RoleId};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryCredentialStore>,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Logs in and returns the `name=value` pair to send back as a Cookie header.
    pub async fn login(&self, role_name: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                serde_json::json!({ "roleName": role_name, "password": password }),
                None,
            ))
            .await;
        assert_eq!(response.status(), 200, "login as {} failed", role_name);
        session_cookie_pair(&response).expect("login did not set a session cookie")
    }
}

pub fn test_state(
    store: Arc<MemoryCredentialStore>,
    verifier: Arc<dyn CredentialVerifier>,
    environment: AppEnvironment,
) -> AppState {
    AppState::new(
        store as Arc<dyn CredentialStore>,
        verifier,
        jwt_config(),
        environment,
    )
}

pub fn setup_app_with(
    records: Vec<CredentialRecord>,
    verifier: Arc<dyn CredentialVerifier>,
    environment: AppEnvironment,
) -> TestApp {
    let store = Arc::new(MemoryCredentialStore::with_records(records));
    let state = test_state(store.clone(), verifier, environment);
    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

pub fn setup_app(records: Vec<CredentialRecord>) -> TestApp {
    setup_app_with(
        records,
        Arc::new(PlaintextVerifier),
        AppEnvironment::Development,
    )
}

/// A store whose every call fails as if the database were unreachable.
pub struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn insert(&self, _record: &CredentialRecord) -> Result<(), AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn find_by_id(&self, _id: RoleId) -> Result<Option<CredentialRecord>, AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn find_by_role_name(&self, _name: &str) -> Result<Option<CredentialRecord>, AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn list(&self) -> Result<Vec<CredentialRecord>, AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn update(
        &self,
        _id: RoleId,
        _changes: RoleChanges,
    ) -> Result<Option<CredentialRecord>, AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn delete(&self, _id: RoleId) -> Result<bool, AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(AppError::database(anyhow::anyhow!("connection refused")))
    }
}

pub fn record(role_name: &str, password: &str, permissions: &[&str]) -> CredentialRecord {
    CredentialRecord::new(
        role_name,
        password,
        permissions.iter().map(|p| p.to_string()).collect(),
    )
}

pub fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(String::from)
        .collect()
}

/// The `token=...` pair from the response's Set-Cookie header.
pub fn session_cookie_pair(response: &Response<Body>) -> Option<String> {
    set_cookie_headers(response)
        .into_iter()
        .find(|c| c.starts_with("token="))
        .and_then(|c| c.split(';').next().map(String::from))
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
