
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn login_with_default_credentials_returns_a_session() {
    let app = TestApp::spawn().await;

    let response = app.login("admin", "admin123").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["tokenType"], "Bearer");
}

#[actix_rt::test]
async fn wrong_password_is_rejected_with_the_login_message() {
    let app = TestApp::spawn().await;

    let response = app.login("admin", "wrongpass").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid username or password.");
}

#[actix_rt::test]
async fn admin_routes_require_a_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/admin/analytics"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.admin_get("not-a-real-token", "/admin/analytics").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let response = app.admin_get(&token, "/admin/analytics").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn session_endpoint_reports_the_expiry() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_get(&token, "/auth/session").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token"], token.as_str());
    assert!(body["expiresAt"].is_string());
}

#[actix_rt::test]
async fn logout_invalidates_the_token() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin_post(&token, "/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.admin_get(&token, "/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn change_password_rules_and_success() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let cases = [
        (json!({"currentPassword": "admin123", "newPassword": "ab", "confirmPassword": "ab"}),
            "New password must be at least 6 characters long."),
        (json!({"currentPassword": "admin123", "newPassword": "newpass1", "confirmPassword": "newpass2"}),
            "New passwords do not match."),
        (json!({"currentPassword": "guess", "newPassword": "newpass1", "confirmPassword": "newpass1"}),
            "Current password is incorrect."),
    ];
    for (body, message) in cases {
        let response = app.admin_post(&token, "/auth/change-password", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], message);
    }

    let response = app.admin_post(
        &token,
        "/auth/change-password",
        json!({"currentPassword": "admin123", "newPassword": "newpass1", "confirmPassword": "newpass1"}),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(app.login("admin", "admin123").await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.login("admin", "newpass1").await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn forgot_password_checks_email_shape() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/auth/forgot-password"))
        .json(&json!({"email": "owner"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.client
        .post(app.url("/auth/forgot-password"))
        .json(&json!({"email": "owner@site.dev"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn empty_login_fields_get_the_login_failure_message() {
    let app = TestApp::spawn().await;

    let response = app.login("", "").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid username or password.");
}
