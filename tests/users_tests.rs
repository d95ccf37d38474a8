mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json, json_request};
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/users",
            &json!({ "email": "alice@example.com", "password": "hunter2hunter2" }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "alice@example.com");
    assert!(json["id"].as_i64().is_some());

    // Password is stored hashed, never in the clear
    let user = app
        .db
        .users()
        .get_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password_hash, "hunter2hunter2");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_signup_then_login() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/users",
            &json!({ "email": "alice@example.com", "password": "hunter2hunter2" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .send(json_request(
            "POST",
            "/api/login",
            &json!({ "email": "alice@example.com", "password": "hunter2hunter2" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["accessToken"].as_str().is_some());
    assert!(json["refreshToken"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    let body = json!({ "email": "alice@example.com", "password": "hunter2hunter2" });

    let response = app
        .send(json_request("POST", "/api/users", &body, None))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Email comparison ignores case
    let response = app
        .send(json_request(
            "POST",
            "/api/users",
            &json!({ "email": "ALICE@example.com", "password": "hunter2hunter2" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/users",
            &json!({ "email": "not-an-email", "password": "hunter2hunter2" }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/users",
            &json!({ "email": "alice@example.com", "password": "short" }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
