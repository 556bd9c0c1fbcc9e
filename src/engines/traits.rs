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

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// 传输层结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// 收到了响应，与 HTTP 状态码无关
    Ok,
    /// 超过截止时间
    Timeout,
    /// 代理失败（仅在配置了代理时出现）
    ProxyError,
    /// 网络连接失败
    ConnectionError,
    /// 其他错误
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            FetchStatus::Ok => "OK",
            FetchStatus::Timeout => "TIMEOUT",
            FetchStatus::ProxyError => "PROXY_ERROR",
            FetchStatus::ConnectionError => "CONNECTION_ERROR",
            FetchStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: FetchMethod,
    /// 目标URL
    pub url: String,
    /// 超时时间
    pub timeout: Duration,
    /// 请求头
    pub headers: HashMap<String, String>,
    /// JSON 请求体，GET 请求忽略
    pub body: Option<serde_json::Value>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            timeout,
            headers: HashMap::new(),
            body: None,
        }
    }
}

/// 抓取响应
///
/// JSON 解析是惰性的，第一次访问 `json()` 或 `json_parse_error()` 时执行并缓存结果。
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: FetchStatus,
    /// 失败时的错误描述
    pub message: String,
    /// HTTP状态码，未收到响应时为 0
    pub http_code: u16,
    /// 响应内容
    pub body: String,
    /// 响应头
    pub headers: HashMap<String, String>,
    json: OnceCell<Option<serde_json::Value>>,
}

impl FetchResponse {
    /// 收到了响应
    pub fn ok(http_code: u16, body: String, headers: HashMap<String, String>) -> Self {
        Self {
            status: FetchStatus::Ok,
            message: String::new(),
            http_code,
            body,
            headers,
            json: OnceCell::new(),
        }
    }

    /// 未收到响应
    pub fn failed(status: FetchStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_code: 0,
            body: String::new(),
            headers: HashMap::new(),
            json: OnceCell::new(),
        }
    }

    pub fn is_timeout_error(&self) -> bool {
        self.status == FetchStatus::Timeout
    }

    pub fn is_error(&self) -> bool {
        self.status != FetchStatus::Ok
    }

    /// 解析后的 JSON，解析失败时为 `None`
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.parsed().as_ref()
    }

    /// 响应体是否不是合法 JSON
    pub fn json_parse_error(&self) -> bool {
        self.parsed().is_none()
    }

    fn parsed(&self) -> &Option<serde_json::Value> {
        self.json
            .get_or_init(|| serde_json::from_str(&self.body).ok())
    }
}

/// HTTP 抓取客户端特质
///
/// 实现方不得返回错误：所有传输层失败都要折叠进 `FetchResponse::status`。
/// 实现内部不做重试。
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// 执行一次请求
    async fn request(&self, request: &FetchRequest) -> FetchResponse;

    /// 以 GET 方式抓取
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResponse {
        self.request(&FetchRequest::get(url, timeout)).await
    }

    /// 客户端名称
    fn name(&self) -> &'static str;
}
