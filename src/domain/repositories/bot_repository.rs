// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::bot::Bot;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 机器人配置仓库特质
#[async_trait]
pub trait BotRepository: Send + Sync {
    /// 读取单例记录
    async fn get(&self) -> Result<Option<Bot>, RepositoryError>;
    /// 写入单例记录，不存在时插入
    async fn save(&self, bot: &Bot) -> Result<Bot, RepositoryError>;
}
