// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// 单例记录的固定ID
pub const BOT_ID: i32 = 1;

/// 全局机器人配置
///
/// 整个系统只有一条记录。`started` 仅作为对外暴露的状态，调度周期不会读取它。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    /// 每次抓取的超时时间（秒）
    pub timeout: i64,
    /// 每个周期的并发上限，同时也是选择结果的数量上限
    pub worker_limit: i64,
    pub started: bool,
    pub updated_at: DateTime<FixedOffset>,
}

impl Bot {
    pub fn new(timeout: i64, worker_limit: i64) -> Self {
        Self {
            timeout,
            worker_limit,
            started: false,
            updated_at: Utc::now().into(),
        }
    }

    /// 抓取超时
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1) as u64)
    }

    /// 并发上限，至少为 1
    pub fn worker_limit(&self) -> usize {
        self.worker_limit.max(1) as usize
    }
}

/// 更新机器人配置的参数
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateBotParams {
    /// 抓取超时（秒）
    #[validate(range(min = 1, max = 600))]
    pub timeout: i64,
    #[validate(range(min = 1, max = 1000))]
    pub worker_limit: i64,
}
