// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::bot::{Bot, BOT_ID};
use crate::domain::repositories::bot_repository::BotRepository;
use crate::infrastructure::database::entities::bot as bot_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

/// 机器人配置仓库实现
#[derive(Clone)]
pub struct BotRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl BotRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<bot_entity::Model> for Bot {
    fn from(model: bot_entity::Model) -> Self {
        Self {
            timeout: model.timeout,
            worker_limit: model.worker_limit,
            started: model.started,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl BotRepository for BotRepositoryImpl {
    async fn get(&self) -> Result<Option<Bot>, RepositoryError> {
        let model = bot_entity::Entity::find_by_id(BOT_ID)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, bot: &Bot) -> Result<Bot, RepositoryError> {
        let model = bot_entity::ActiveModel {
            id: Set(BOT_ID),
            timeout: Set(bot.timeout),
            worker_limit: Set(bot.worker_limit),
            started: Set(bot.started),
            updated_at: Set(bot.updated_at),
        };

        bot_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(bot_entity::Column::Id)
                    .update_columns([
                        bot_entity::Column::Timeout,
                        bot_entity::Column::WorkerLimit,
                        bot_entity::Column::Started,
                        bot_entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        self.get().await?.ok_or(RepositoryError::NotFound)
    }
}
