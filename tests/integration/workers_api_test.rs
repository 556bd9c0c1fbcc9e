// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ACCESS_TOKEN};
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bearer() -> String {
    format!("Bearer {}", ACCESS_TOKEN)
}

/// 创建、查询、启停和删除 worker
#[tokio::test]
async fn test_worker_lifecycle() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&json!({
            "name": "prices",
            "source": "https://example.com/prices.json",
            "interval": 30
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["name"], "prices");
    assert_eq!(created["started"], false);
    assert!(created["last_work_at"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/api/workers/{}/start", id))
        .add_header("Authorization", bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["started"], true);

    let response = app
        .server
        .get("/api/workers")
        .add_query_param("started", true)
        .add_header("Authorization", bearer())
        .await;
    let workers: Vec<Value> = response.json();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["id"], id.as_str());

    let response = app
        .server
        .post(&format!("/api/workers/{}/stop", id))
        .add_header("Authorization", bearer())
        .await;
    assert_eq!(response.json::<Value>()["started"], false);

    let response = app
        .server
        .get("/api/workers")
        .add_query_param("started", true)
        .add_header("Authorization", bearer())
        .await;
    assert!(response.json::<Vec<Value>>().is_empty());

    let response = app
        .server
        .delete(&format!("/api/workers/{}", id))
        .add_header("Authorization", bearer())
        .await;
    assert!(response.json::<bool>());

    let response = app
        .server
        .get(&format!("/api/workers/{}", id))
        .add_header("Authorization", bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 名称重复返回 409，非法来源返回 400
#[tokio::test]
async fn test_create_worker_rejections() {
    let app = create_test_app().await;
    let payload = json!({
        "name": "prices",
        "source": "https://example.com/prices.json",
        "interval": 30
    });

    app.server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "a worker with the name 'prices' exists already"
    );

    let response = app
        .server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&json!({
            "name": "bad",
            "source": "http2://example.com",
            "interval": 30
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&json!({
            "name": "zero",
            "source": "https://example.com",
            "interval": 0
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 手动触发 worker 执行并查询结果
#[tokio::test]
async fn test_manual_work_stores_data() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"btc": 1})))
        .mount(&mock_server)
        .await;

    let app = create_test_app().await;
    let created: Value = app
        .server
        .post("/api/workers")
        .add_header("Authorization", bearer())
        .json(&json!({
            "name": "prices",
            "source": format!("{}/prices.json", mock_server.uri()),
            "interval": 30
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    // 未启动时跳过
    let response = app
        .server
        .post(&format!("/api/workers/{}/work", id))
        .add_header("Authorization", bearer())
        .await;
    assert!(!response.json::<bool>());

    app.server
        .post(&format!("/api/workers/{}/start", id))
        .add_header("Authorization", bearer())
        .await
        .assert_status_ok();

    let response = app
        .server
        .post(&format!("/api/workers/{}/work", id))
        .add_header("Authorization", bearer())
        .await;
    assert!(response.json::<bool>());

    let response = app
        .server
        .get("/api/data")
        .add_query_param("worker", "prices")
        .add_header("Authorization", bearer())
        .await;
    let data: Vec<Value> = response.json();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["status"], "ok");
    assert_eq!(data[0]["data"], json!({"btc": 1}));
}

/// 未知 worker 的操作返回 404
#[tokio::test]
async fn test_unknown_worker_returns_not_found() {
    let app = create_test_app().await;
    let id = Uuid::new_v4();

    let response = app
        .server
        .post(&format!("/api/workers/{}/start", id))
        .add_header("Authorization", bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/api/workers/{}", id))
        .add_header("Authorization", bearer())
        .await;
    assert!(!response.json::<bool>());
}
