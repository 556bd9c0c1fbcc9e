// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 一次轮询的结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    /// 收到响应且成功解析为 JSON
    Ok,
    /// 请求超时
    Timeout,
    /// 代理错误
    ProxyError,
    /// 收到响应但不是合法 JSON
    JsonError,
    /// 其他传输层错误
    Error,
}

impl DataStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataStatus::Ok => "ok",
            DataStatus::Timeout => "timeout",
            DataStatus::ProxyError => "proxy_error",
            DataStatus::JsonError => "json_error",
            DataStatus::Error => "error",
        }
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(DataStatus::Ok),
            "timeout" => Ok(DataStatus::Timeout),
            "proxy_error" => Ok(DataStatus::ProxyError),
            "json_error" => Ok(DataStatus::JsonError),
            "error" => Ok(DataStatus::Error),
            _ => Err(()),
        }
    }
}

/// 数据记录
///
/// 一次轮询的不可变结果，只追加不修改。`data` 仅在状态为 `Ok` 时存在。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub id: Uuid,
    /// worker 名称
    pub worker: String,
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<FixedOffset>,
}

impl Data {
    pub fn new(worker: String, status: DataStatus, data: Option<serde_json::Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            worker,
            status,
            data,
            created_at: Utc::now().into(),
        }
    }
}

/// 数据记录查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    pub worker: Option<String>,
    pub status: Option<DataStatus>,
    pub limit: Option<u64>,
}
