// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::data::{Data, DataStatus};
use crate::engines::traits::FetchResponse;

/// 将一次抓取结果归类为 `Data` 记录
///
/// - 超时 → `Timeout`
/// - 收到响应但不是合法 JSON → `JsonError`
/// - 收到响应且解析成功 → `Ok`，携带解析后的内容
/// - 其他传输层失败 → `Error`
pub fn classify(worker_name: &str, response: &FetchResponse) -> Data {
    let (status, payload) = if response.is_timeout_error() {
        (DataStatus::Timeout, None)
    } else if response.is_error() {
        (DataStatus::Error, None)
    } else {
        match response.json() {
            Some(value) => (DataStatus::Ok, Some(value.clone())),
            None => (DataStatus::JsonError, None),
        }
    };

    Data::new(worker_name.to_string(), status, payload)
}
