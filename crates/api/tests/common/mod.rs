#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use iotwatch_api::auth::jwt::JwtConfig;
use iotwatch_api::config::{CorsOrigins, LogFormat, ServerConfig, StoreKind, ThresholdScope};
use iotwatch_api::router::build_app_router;
use iotwatch_api::state::AppState;
use iotwatch_db::Stores;
use tower::ServiceExt;

/// Secret used to sign every token in the test suite.
pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        jwt: JwtConfig::new(TEST_SECRET, 7),
        hash_workers: 2,
        threshold_scope: ThresholdScope::Global,
        store: StoreKind::Memory,
        log_format: LogFormat::Pretty,
    }
}

/// A running application plus a handle on its state, so tests can reach
/// the stores directly.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_stores(Stores::memory(), config)
    }

    /// Build over caller-supplied stores, e.g. with a substituted `UserStore`.
    pub fn with_stores(stores: Stores, config: ServerConfig) -> Self {
        let state = AppState::new(stores, config);
        let router = build_app_router(state.clone());
        Self { router, state }
    }

    /// The router is cheap to clone; each request gets its own copy.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Register a user through the API and return `(token, user_id)`.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> (String, i64) {
        let body = serde_json::json!({ "email": email, "password": password, "name": name });
        let response = post_json(self.app(), "/api/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        (
            json["token"].as_str().unwrap().to_string(),
            json["user"]["id"].as_i64().unwrap(),
        )
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    get_with_header(app, uri, &format!("Bearer {token}")).await
}

/// GET with a raw `Authorization` header value.
pub async fn get_with_header(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw, possibly invalid, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
