// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::{create_test_app, ACCESS_TOKEN};
use axum::http::StatusCode;

/// 健康检查和版本端点无需认证
#[tokio::test]
async fn health_check_and_version_are_public() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 未携带访问令牌时 API 返回 403
#[tokio::test]
async fn api_requires_access_token() {
    let app = create_test_app().await;

    let response = app.server.get("/api/workers").await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/workers")
        .add_header("access_token", "wrong")
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/workers")
        .add_query_param("access_token", ACCESS_TOKEN)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
