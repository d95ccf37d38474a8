#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use quillpost::db::{Database, UserRole};
use quillpost::jwt::{Clock, JwtConfig, LifetimePolicy};
use quillpost::service::hash_password;
use quillpost::{ServerConfig, create_app, create_app_with_jwt};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-jwt-secret-that-is-long-enough!";
pub const TEST_ISSUER: &str = "quillpost-test";
pub const TEST_PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub app: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::open(":memory:")
            .await
            .expect("Failed to open test database");
        let config = ServerConfig {
            db: db.clone(),
            jwt_secret: TEST_SECRET.to_vec(),
            jwt_issuer: TEST_ISSUER.to_string(),
            token_lifetimes: LifetimePolicy::default(),
        };
        Self {
            app: create_app(&config),
            db,
        }
    }

    /// App whose token issuing and validation both run on `clock`.
    pub async fn with_clock(clock: impl Clock + 'static) -> Self {
        let db = Database::open(":memory:")
            .await
            .expect("Failed to open test database");
        let jwt = JwtConfig::new(TEST_SECRET, TEST_ISSUER).with_clock(clock);
        Self {
            app: create_app_with_jwt(db.clone(), Arc::new(jwt)),
            db,
        }
    }

    /// A JWT config matching the app's secret and issuer, for minting tokens directly.
    pub fn jwt(&self) -> JwtConfig {
        JwtConfig::new(TEST_SECRET, TEST_ISSUER)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Insert a user directly, bypassing the signup endpoint.
    pub async fn create_user(&self, email: &str, role: UserRole) -> i64 {
        let hash = hash_password(TEST_PASSWORD).unwrap();
        self.db
            .users()
            .create_with_role(email, &hash, role)
            .await
            .unwrap()
    }

    /// Log in and return the JSON body of the login response.
    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .send(json_request(
                "POST",
                "/api/login",
                &serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
                None,
            ))
            .await;
        assert_eq!(response.status(), 200, "login failed for {}", email);
        body_json(response).await
    }

    /// Create a user and return a fresh access token for them.
    pub async fn access_token_for(&self, email: &str, role: UserRole) -> String {
        self.create_user(email, role).await;
        let login = self.login(email).await;
        login["accessToken"].as_str().unwrap().to_string()
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
