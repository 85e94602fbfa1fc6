//! Search paging and filtering over HTTP.

use std::collections::BTreeSet;

use http::StatusCode;

use entityhub_core::config::{AppConfig, QueryConfig};

use crate::helpers::TestApp;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body["Result"]
        .as_array()
        .expect("Result is not an array")
        .iter()
        .map(|v| v["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn test_pages_are_disjoint_and_complete() {
    let app = TestApp::new();
    for i in 0..25 {
        app.create_team(&format!("team-{i:02}")).await;
    }

    let mut seen = BTreeSet::new();
    for (page, expected) in [(1, 10), (2, 10), (3, 5)] {
        let path = format!("/api/teams/search?page={page}&limit=10");
        let first = app.request("GET", &path, None).await;
        let again = app.request("GET", &path, None).await;
        assert_eq!(first.status, StatusCode::OK);
        assert_eq!(first.body["Count"], 25);
        assert_eq!(ids(&first.body), ids(&again.body));

        let page_ids = ids(&first.body);
        assert_eq!(page_ids.len(), expected);
        assert!(page_ids.windows(2).all(|w| w[0] < w[1]));
        for id in page_ids {
            assert!(seen.insert(id), "id {id} appeared on two pages");
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_bad_paging_values_are_clamped() {
    let app = TestApp::new();
    for i in 0..3 {
        app.create_team(&format!("t{i}")).await;
    }

    let response = app
        .request("GET", "/api/teams/search?page=-4&limit=0", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body).len(), 1);
    assert_eq!(response.body["Count"], 3);

    let response = app
        .request("GET", "/api/teams/search?page=abc&limit=xyz", None)
        .await;
    assert_eq!(ids(&response.body).len(), 3);
}

#[tokio::test]
async fn test_limit_capped_by_configuration() {
    let config = AppConfig {
        query: QueryConfig {
            default_limit: 2,
            max_limit: 4,
        },
        ..AppConfig::default()
    };
    let app = TestApp::with_config(config);
    assert_eq!(app.config.query.max_limit, 4);
    for i in 0..6 {
        app.create_team(&format!("t{i}")).await;
    }

    let response = app.request("GET", "/api/teams/search", None).await;
    assert_eq!(ids(&response.body).len(), 2);

    let response = app.request("GET", "/api/teams/search?limit=50", None).await;
    assert_eq!(ids(&response.body).len(), 4);
    assert_eq!(response.body["Count"], 6);
}

#[tokio::test]
async fn test_unknown_and_uncoercible_filters() {
    let app = TestApp::new();
    app.create_team("a").await;
    app.create_team("b").await;

    let response = app
        .request("GET", "/api/teams/search?colour=blue", None)
        .await;
    assert_eq!(response.body["Count"], 2);

    let response = app
        .request("GET", "/api/teams/search?max_members=many", None)
        .await;
    assert_eq!(response.body["Count"], 0);

    let response = app
        .request("GET", "/api/teams/search?max_members=10&name=b", None)
        .await;
    assert_eq!(response.body["Count"], 1);
    assert_eq!(response.body["Result"][0]["name"], "b");
}
