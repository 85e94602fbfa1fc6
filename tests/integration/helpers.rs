//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use entityhub_core::config::AppConfig;
use entityhub_database::RepositorySet;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let router = entityhub_api::build_app(config.clone(), RepositorySet::in_memory());
        Self { router, config }
    }

    /// Create a user and return its identifier
    pub async fn create_user(&self, login: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(json!({
                    "login": login,
                    "email": format!("{login}@example.com"),
                })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create user failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Create a team and return its identifier
    pub async fn create_team(&self, name: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/teams",
                Some(json!({ "name": name, "max_members": 10 })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create team failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body
    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().expect("No id in response body")
    }
}
