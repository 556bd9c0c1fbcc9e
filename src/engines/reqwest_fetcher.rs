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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{FetchMethod, FetchRequest, FetchResponse, FetchStatus, HttpFetcher};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use tracing::debug;

/// 抓取客户端
///
/// 基于reqwest实现，整个进程共享一个连接池，超时按请求设置
pub struct ReqwestFetcher {
    client: reqwest::Client,
    /// 是否配置了代理，用于区分代理失败和普通连接失败
    proxied: bool,
}

impl ReqwestFetcher {
    /// 创建抓取客户端
    ///
    /// # 参数
    ///
    /// * `settings` - HTTP 客户端配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 客户端
    /// * `Err(reqwest::Error)` - 代理地址无效或 TLS 初始化失败
    pub fn new(settings: &HttpSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());

        if let Some(proxy_url) = &settings.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            proxied: settings.proxy.is_some(),
        })
    }

    fn classify_error(&self, err: reqwest::Error) -> FetchResponse {
        let status = if err.is_timeout() {
            FetchStatus::Timeout
        } else if err.is_connect() && self.proxied {
            FetchStatus::ProxyError
        } else if err.is_connect() {
            FetchStatus::ConnectionError
        } else {
            FetchStatus::Error
        };
        debug!("Fetch failed with {}: {}", status, err);
        FetchResponse::failed(status, err.to_string())
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn request(&self, request: &FetchRequest) -> FetchResponse {
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            if let (Ok(k), Ok(v)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.insert(k, v);
            }
        }

        let mut builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url),
            FetchMethod::Post => self.client.post(&request.url),
            FetchMethod::Put => self.client.put(&request.url),
            FetchMethod::Delete => self.client.delete(&request.url),
        }
        .timeout(request.timeout)
        .headers(headers);

        if let (Some(body), false) = (&request.body, request.method == FetchMethod::Get) {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return self.classify_error(e),
        };

        let http_code = response.status().as_u16();
        let mut response_headers = HashMap::new();
        for (k, v) in response.headers() {
            if let Ok(v_str) = v.to_str() {
                response_headers.insert(k.as_str().to_string(), v_str.to_string());
            }
        }

        match response.text().await {
            Ok(body) => FetchResponse::ok(http_code, body, response_headers),
            Err(e) => self.classify_error(e),
        }
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_fetcher_test.rs"]
mod tests;
