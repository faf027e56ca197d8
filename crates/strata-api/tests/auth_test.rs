//! Integration tests for the auth routes and the bearer-token middleware.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.add_user(1, "alice", true, false);

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({"UserName": "alice", "Password": PASSWORD})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["Code"], 0);
    assert_eq!(response.body["Message"], "Success");
    assert!(response.body["Data"]["JwtToken"].is_string());
    assert!(response.body["Data"]["RefreshToken"].is_string());
}

#[tokio::test]
async fn test_login_inactive_or_programmatic_user_is_not_found() {
    let app = TestApp::new();
    app.add_user(1, "inactive", false, false);
    app.add_user(2, "bot", true, true);

    for name in ["inactive", "bot", "nobody"] {
        let response = app
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(json!({"UserName": name, "Password": PASSWORD})),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            response.body,
            json!({"Data": null, "Code": 1, "Message": "user is not found"})
        );
    }
}

#[tokio::test]
async fn test_login_missing_fields_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/v1/auth/login", Some(json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["Code"], 1);
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = TestApp::new();
    app.add_user(1, "alice", true, false);

    let login = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({"UserName": "alice", "Password": PASSWORD})),
            None,
        )
        .await;
    let refresh = login.body["Data"]["RefreshToken"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/access-token",
            Some(json!({"RefreshToken": refresh})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_ne!(response.body["Data"]["RefreshToken"], refresh);
}

#[tokio::test]
async fn test_programmatic_token() {
    let app = TestApp::new();
    app.add_user(9, "bot", true, true);

    let response = app
        .request(
            "POST",
            "/api/v1/auth/access-token/programmatic",
            Some(json!({"UserName": "bot", "Password": PASSWORD, "ExpiryDays": 3})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["Data"]["JwtToken"].as_str().unwrap();

    let me = app
        .request("GET", "/api/v1/auth", None, Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(me.body["Data"], "id:9 user:bot email:bot@example.com");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = TestApp::new();
    let token = app.token_for(42, "alice");

    let response = app
        .request("GET", "/api/v1/auth", None, Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["Data"],
        "id:42 user:alice email:alice@example.com"
    );
}

#[tokio::test]
async fn test_lowercase_bearer_is_accepted() {
    let app = TestApp::new();
    let token = app.token_for(1, "alice");

    let response = app
        .request("GET", "/api/v1/auth", None, Some(&format!("bearer {token}")))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_tokens_are_rejected() {
    let app = TestApp::new();
    let token = app.token_for(1, "alice");
    let upper = format!("BEARER {token}");

    for header in [None, Some("Bearer garbage"), Some(upper.as_str())] {
        let response = app.request("GET", "/api/v1/auth", None, header).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers["content-type"],
            "application/json; charset=utf-8"
        );
        assert_eq!(
            response.body,
            json!({"Data": null, "Code": 1, "Message": "JWT token is invalid"})
        );
    }
}
