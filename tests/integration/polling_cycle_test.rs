// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ACCESS_TOKEN};
use pollbot::domain::models::data::DataStatus;
use pollbot::domain::models::worker::CreateWorkerParams;
use pollbot::scheduler::Scheduler;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_source() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 42})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    server
}

/// 一个周期处理所有到期 worker，并按结果归类
#[tokio::test]
async fn test_cycle_classifies_each_outcome() {
    let source = mock_source().await;
    let app = create_test_app().await;

    for (name, route) in [("ok", "/ok"), ("html", "/html"), ("slow", "/slow")] {
        let worker = app
            .worker_service
            .create_worker(CreateWorkerParams {
                name: name.to_string(),
                source: format!("{}{}", source.uri(), route),
                interval: 60,
            })
            .await
            .unwrap();
        app.worker_service.start_worker(worker.id).await.unwrap();
    }
    let unreachable = app
        .worker_service
        .create_worker(CreateWorkerParams {
            name: "down".to_string(),
            source: "http://127.0.0.1:1/".to_string(),
            interval: 60,
        })
        .await
        .unwrap();
    app.worker_service.start_worker(unreachable.id).await.unwrap();

    let report: Value = app
        .server
        .post("/api/workers/process")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(report["selected"], 4);
    assert_eq!(report["executed"], 4);

    let status_of = |name: &'static str| {
        let data_repo = app.data_repo.clone();
        async move {
            let data = data_repo.find(Some(name), None, 10).await.unwrap();
            assert_eq!(data.len(), 1, "one record for {}", name);
            data[0].status
        }
    };
    assert_eq!(status_of("ok").await, DataStatus::Ok);
    assert_eq!(status_of("html").await, DataStatus::JsonError);
    assert_eq!(status_of("slow").await, DataStatus::Timeout);
    assert_eq!(status_of("down").await, DataStatus::Error);

    // 刚执行过的 worker 在间隔内不会再次被选中
    let report: Value = app
        .server
        .post("/api/workers/process")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(report["selected"], 0);
}

/// 调度器驱动的周期会持续轮询
#[tokio::test]
async fn test_scheduler_drives_polling() {
    let source = mock_source().await;
    let app = create_test_app().await;
    let worker = app
        .worker_service
        .create_worker(CreateWorkerParams {
            name: "ok".to_string(),
            source: format!("{}/ok", source.uri()),
            interval: 1,
        })
        .await
        .unwrap();
    app.worker_service.start_worker(worker.id).await.unwrap();

    let scheduler = Scheduler::new(Duration::from_millis(50));
    let service = app.worker_service.clone();
    scheduler.add_job("process_workers", Duration::from_millis(200), move || {
        let service = service.clone();
        async move {
            service.process_workers().await?;
            anyhow::Ok(())
        }
    });
    let handle = scheduler.start();

    tokio::time::sleep(Duration::from_millis(2600)).await;
    scheduler.stop();
    handle.await.unwrap();

    let count = app.data_repo.count_by_worker("ok").await.unwrap();
    assert!(count >= 2, "expected repeated polling, got {}", count);
}
