// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::data::{Data, DataStatus};
use crate::domain::repositories::data_repository::DataRepository;
use crate::infrastructure::database::entities::data as data_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::warn;

/// 数据记录仓库实现
#[derive(Clone)]
pub struct DataRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl DataRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<data_entity::Model> for Data {
    fn from(model: data_entity::Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            warn!("Unknown data status '{}' for record {}", model.status, model.id);
            DataStatus::Error
        });
        Self {
            id: model.id,
            worker: model.worker,
            status,
            data: model.data,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl DataRepository for DataRepositoryImpl {
    async fn insert(&self, data: &Data) -> Result<(), RepositoryError> {
        let model = data_entity::ActiveModel {
            id: Set(data.id),
            worker: Set(data.worker.clone()),
            status: Set(data.status.to_string()),
            data: Set(data.data.clone()),
            created_at: Set(data.created_at),
        };
        model.insert(self.db.as_ref()).await?;
        Ok(())
    }

    async fn find(
        &self,
        worker: Option<&str>,
        status: Option<DataStatus>,
        limit: u64,
    ) -> Result<Vec<Data>, RepositoryError> {
        let mut query = data_entity::Entity::find();
        if let Some(worker) = worker {
            query = query.filter(data_entity::Column::Worker.eq(worker));
        }
        if let Some(status) = status {
            query = query.filter(data_entity::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(data_entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_worker(&self, worker: &str) -> Result<u64, RepositoryError> {
        let count = data_entity::Entity::find()
            .filter(data_entity::Column::Worker.eq(worker))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(data_entity::Entity::find().count(self.db.as_ref()).await?)
    }
}
