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

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 请求头和查询参数中访问令牌的名称
pub const ACCESS_TOKEN_NAME: &str = "access_token";

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 配置的访问令牌，为空时拒绝所有请求
    pub access_token: Arc<str>,
}

impl AuthState {
    pub fn new(access_token: impl Into<Arc<str>>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// 认证中间件
///
/// 依次从 `access_token` 请求头、`access_token` 查询参数和
/// `Authorization: Bearer` 中读取令牌
pub async fn auth_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    if state.access_token.is_empty() {
        warn!("Rejecting request: no access token configured");
        return Err(StatusCode::FORBIDDEN);
    }

    match extract_token(req.headers(), req.uri().query()) {
        Some(token) if token == *state.access_token => Ok(next.run(req).await),
        Some(_) => {
            warn!("Invalid access token for {}", req.uri().path());
            Err(StatusCode::FORBIDDEN)
        }
        None => Err(StatusCode::FORBIDDEN),
    }
}

fn extract_token(headers: &HeaderMap, query: Option<&str>) -> Option<String> {
    if let Some(token) = headers
        .get(ACCESS_TOKEN_NAME)
        .and_then(|value| value.to_str().ok())
    {
        return Some(token.to_string());
    }

    if let Some(token) = query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == ACCESS_TOKEN_NAME)
            .map(|(_, value)| value.into_owned())
    }) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
