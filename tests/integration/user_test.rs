//! User collection over HTTP.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_and_fetch_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "login": "alice",
                "email": "alice@example.com",
                "display_name": "Alice",
                "role": "manager",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["login"], "alice");
    assert_eq!(response.body["status"], "active");
    let id = response.id();
    assert!(id > 0);

    let response = app.request("GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["role"], "manager");

    let response = app.request("GET", "/api/users", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{"id": id, "login": "alice", "name": "Alice", "role": "manager"}]));
}

#[tokio::test]
async fn test_invalid_user_returns_ordered_messages() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/users", Some(json!({ "login": "al", "email": "nope" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["details"],
        json!([
            "Login must be between 3 and 64 characters",
            "Email is not a valid address",
        ])
    );

    let response = app.request("GET", "/api/users", None).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_duplicate_login_conflicts() {
    let app = TestApp::new();
    app.create_user("alice").await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "login": "alice", "email": "other@example.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DOMAIN_RULE_VIOLATION");

    let bob = app.create_user("bob").await;
    let response = app.request("GET", "/api/users/by-login/bob", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.id(), bob);

    let response = app.request("GET", "/api/users/search?login=alice", None).await;
    assert_eq!(response.body["Count"], 1);
}

#[tokio::test]
async fn test_by_login_unknown_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/users/by-login/ghost", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let id = app.create_user("carol").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "display_name": "Carol C.", "status": "locked" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["display_name"], "Carol C.");
    assert_eq!(response.body["status"], "locked");
    assert_eq!(response.body["login"], "carol");
    assert_eq!(response.id(), id);

    let response = app
        .request("PUT", &format!("/api/users/{id}"), Some(json!({ "email": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"], json!(["Email is required"]));
}

#[tokio::test]
async fn test_put_unknown_user_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request("PUT", "/api/users/999", Some(json!({ "login": "" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let id = app.create_user("dave").await;

    let response = app.request("DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_to_taken_login_conflicts() {
    let app = TestApp::new();
    app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{bob}"),
            Some(json!({ "login": "alice" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DOMAIN_RULE_VIOLATION");

    let response = app.request("GET", "/api/users/search?login=alice", None).await;
    assert_eq!(response.body["Count"], 1);
    let response = app.request("GET", &format!("/api/users/{bob}"), None).await;
    assert_eq!(response.body["login"], "bob");
}

#[tokio::test]
async fn test_unknown_role_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "login": "erin", "email": "erin@example.com", "role": "superuser" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");

    let id = app.create_user("erin").await;
    let response = app
        .request(
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "role": "superuser" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}
