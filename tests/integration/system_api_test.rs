// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ACCESS_TOKEN};
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 系统统计反映 worker 与数据条数以及调度周期状态
#[tokio::test]
async fn test_system_stats_report_counts_and_cycle_flag() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/system")
        .add_header("access_token", ACCESS_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let stats: Value = response.json();
    assert_eq!(stats["workers"], 0);
    assert_eq!(stats["data"], 0);
    assert_eq!(stats["process_workers_running"], false);

    for name in ["feed", "idle"] {
        app.server
            .post("/api/workers")
            .add_header("access_token", ACCESS_TOKEN)
            .json(&json!({
                "name": name,
                "source": format!("{}/feed.json", mock_server.uri()),
                "interval": 30
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let workers: Vec<Value> = app
        .server
        .get("/api/workers")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    let feed = workers.iter().find(|w| w["name"] == "feed").unwrap();
    let id = feed["id"].as_str().unwrap();
    app.server
        .post(&format!("/api/workers/{}/start", id))
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .assert_status_ok();
    let worked = app
        .server
        .post(&format!("/api/workers/{}/work", id))
        .add_header("access_token", ACCESS_TOKEN)
        .await;
    assert!(worked.json::<bool>());

    let stats: Value = app
        .server
        .get("/api/system")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(stats["workers"], 2);
    assert_eq!(stats["started_workers"], 1);
    assert_eq!(stats["data"], 1);
    assert_eq!(stats["process_workers_running"], false);
    assert!(stats["uptime_seconds"].is_u64());
    assert_eq!(app.scheduler.is_running("process_workers"), Some(false));
}

/// 系统统计同样需要访问令牌
#[tokio::test]
async fn test_system_stats_require_access_token() {
    let app = create_test_app().await;

    let response = app.server.get("/api/system").await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
