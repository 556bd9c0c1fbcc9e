// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ACCESS_TOKEN};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_bot_config_round_trip() {
    let app = create_test_app().await;

    let bot: Value = app
        .server
        .get("/api/bot")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(bot["timeout"], 2);
    assert_eq!(bot["worker_limit"], 15);
    assert_eq!(bot["started"], false);

    let bot: Value = app
        .server
        .put("/api/bot")
        .add_header("access_token", ACCESS_TOKEN)
        .json(&json!({"timeout": 5, "worker_limit": 3}))
        .await
        .json();
    assert_eq!(bot["timeout"], 5);
    assert_eq!(bot["worker_limit"], 3);
    assert_eq!(app.bot_service.get().worker_limit, 3);

    let bot: Value = app
        .server
        .post("/api/bot/start")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(bot["started"], true);

    let bot: Value = app
        .server
        .post("/api/bot/stop")
        .add_header("access_token", ACCESS_TOKEN)
        .await
        .json();
    assert_eq!(bot["started"], false);
}

#[tokio::test]
async fn test_invalid_bot_update_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .put("/api/bot")
        .add_header("access_token", ACCESS_TOKEN)
        .json(&json!({"timeout": 0, "worker_limit": 3}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.bot_service.get().timeout, 2);
}
