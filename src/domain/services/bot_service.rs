// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BotSettings;
use crate::domain::models::bot::{Bot, UpdateBotParams};
use crate::domain::repositories::bot_repository::BotRepository;
use crate::utils::errors::ServiceError;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use validator::Validate;

/// 全局机器人配置服务
///
/// 持有单例配置的内存快照。读取走快照不访问数据库，
/// 写入先落库再刷新快照，写入之间由异步互斥锁串行化。
pub struct BotService {
    repo: Arc<dyn BotRepository>,
    snapshot: RwLock<Bot>,
    write_lock: Mutex<()>,
}

impl BotService {
    /// 加载单例配置，不存在时按默认值创建
    pub async fn init(
        repo: Arc<dyn BotRepository>,
        defaults: &BotSettings,
    ) -> Result<Self, ServiceError> {
        let bot = match repo.get().await? {
            Some(bot) => bot,
            None => {
                info!(
                    "Initialising bot config with timeout={} worker_limit={}",
                    defaults.timeout, defaults.worker_limit
                );
                repo.save(&Bot::new(defaults.timeout, defaults.worker_limit))
                    .await?
            }
        };

        Ok(Self {
            repo,
            snapshot: RwLock::new(bot),
            write_lock: Mutex::new(()),
        })
    }

    /// 当前配置快照
    pub fn get(&self) -> Bot {
        self.snapshot.read().clone()
    }

    pub async fn update(&self, params: UpdateBotParams) -> Result<Bot, ServiceError> {
        params.validate()?;
        self.modify(|bot| {
            bot.timeout = params.timeout;
            bot.worker_limit = params.worker_limit;
        })
        .await
    }

    pub async fn start(&self) -> Result<Bot, ServiceError> {
        self.modify(|bot| bot.started = true).await
    }

    pub async fn stop(&self) -> Result<Bot, ServiceError> {
        self.modify(|bot| bot.started = false).await
    }

    async fn modify<F>(&self, apply: F) -> Result<Bot, ServiceError>
    where
        F: FnOnce(&mut Bot),
    {
        let _guard = self.write_lock.lock().await;

        let mut bot = self.get();
        apply(&mut bot);
        bot.updated_at = Utc::now().into();

        let saved = self.repo.save(&bot).await?;
        *self.snapshot.write() = saved.clone();
        info!(
            "Bot config updated: timeout={} worker_limit={} started={}",
            saved.timeout, saved.worker_limit, saved.started
        );
        Ok(saved)
    }
}
