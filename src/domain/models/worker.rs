// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 轮询间隔上限（秒），约十年
pub const MAX_INTERVAL_SECS: i64 = 315_360_000;

/// 轮询目标
///
/// 每个 worker 指向一个远程 HTTP 数据源，按自己的 `interval` 周期被轮询。
/// `name` 在所有 worker 中唯一，数据记录通过名称而非 ID 引用 worker。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// 唯一标识符
    pub id: Uuid,
    /// 唯一名称
    pub name: String,
    /// 数据源URL
    pub source: String,
    /// 轮询间隔（秒）
    pub interval: i64,
    /// 是否已启动
    pub started: bool,
    /// 最近一次执行时间，从未执行时为空
    pub last_work_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

impl Worker {
    /// 创建一个尚未启动、从未执行过的 worker
    pub fn new(name: String, source: String, interval: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            source,
            interval,
            started: false,
            last_work_at: None,
            created_at: Utc::now().into(),
        }
    }

    /// 判断 worker 在 `now` 时刻是否到期
    ///
    /// 已启动，并且从未执行过或上次执行早于 `now - interval`。
    /// `now - interval` 超出时间范围时视为未到期。
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if !self.started {
            return false;
        }
        let Some(last) = self.last_work_at else {
            return true;
        };
        Duration::try_seconds(self.interval)
            .and_then(|interval| now.checked_sub_signed(interval))
            .is_some_and(|threshold| last < threshold)
    }
}

/// 创建 worker 的参数
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateWorkerParams {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom(function = "validate_source"))]
    pub source: String,
    /// 轮询间隔（秒）
    #[validate(range(min = 1, max = MAX_INTERVAL_SECS))]
    pub interval: i64,
}

/// 数据源必须是带主机名的 http/https 绝对地址
fn validate_source(source: &str) -> Result<(), ValidationError> {
    let url = Url::parse(source).map_err(|_| ValidationError::new("invalid_url"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ValidationError::new("invalid_url_scheme"));
    }
    Ok(())
}
