//! Team collection over HTTP.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_team_lifecycle() {
    let app = TestApp::new();
    let id = app.create_team("platform").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/teams/{id}"),
            Some(json!({ "archived": true })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["archived"], true);
    assert_eq!(response.body["max_members"], 10);

    let response = app.request("GET", "/api/teams/search?archived=true", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["Count"], 1);
    assert_eq!(response.body["Result"][0]["name"], "platform");

    let response = app.request("DELETE", &format!("/api/teams/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_duplicate_team_name_conflicts() {
    let app = TestApp::new();
    app.create_team("core").await;

    let response = app
        .request("POST", "/api/teams", Some(json!({ "name": "core", "max_members": 2 })))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.request("GET", "/api/teams", None).await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invalid_team() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/teams", Some(json!({ "name": "x", "max_members": 5000 })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"],
        json!(["Max members must be between 1 and 1000"])
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["backend"], "memory");
}
