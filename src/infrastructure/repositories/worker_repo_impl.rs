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

use crate::domain::models::worker::Worker;
use crate::domain::repositories::worker_repository::WorkerRepository;
use crate::infrastructure::database::entities::worker as worker_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, NullOrdering},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

/// 扫描到期 worker 时每页读取的行数
const DUE_SCAN_PAGE_SIZE: u64 = 200;

/// Worker仓库实现
///
/// 基于SeaORM实现的 worker 数据访问层
#[derive(Clone)]
pub struct WorkerRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl WorkerRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<worker_entity::Model> for Worker {
    fn from(model: worker_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            source: model.source,
            interval: model.interval,
            started: model.started,
            last_work_at: model.last_work_at,
            created_at: model.created_at,
        }
    }
}

impl From<&Worker> for worker_entity::ActiveModel {
    fn from(worker: &Worker) -> Self {
        use sea_orm::Set;
        Self {
            id: Set(worker.id),
            name: Set(worker.name.clone()),
            source: Set(worker.source.clone()),
            interval: Set(worker.interval),
            started: Set(worker.started),
            last_work_at: Set(worker.last_work_at),
            created_at: Set(worker.created_at),
        }
    }
}

#[async_trait]
impl WorkerRepository for WorkerRepositoryImpl {
    async fn create(&self, worker: &Worker) -> Result<Worker, RepositoryError> {
        let model: worker_entity::ActiveModel = worker.into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, RepositoryError> {
        let model = worker_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Worker>, RepositoryError> {
        let model = worker_entity::Entity::find()
            .filter(worker_entity::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        started: Option<bool>,
        limit: u64,
    ) -> Result<Vec<Worker>, RepositoryError> {
        let mut query = worker_entity::Entity::find();
        if let Some(started) = started {
            query = query.filter(worker_entity::Column::Started.eq(started));
        }

        let models = query
            .order_by_desc(worker_entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, started: Option<bool>) -> Result<u64, RepositoryError> {
        let mut query = worker_entity::Entity::find();
        if let Some(started) = started {
            query = query.filter(worker_entity::Column::Started.eq(started));
        }
        Ok(query.count(self.db.as_ref()).await?)
    }

    async fn find_due(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Worker>, RepositoryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        // The due predicate depends on each row's own interval, so it is evaluated here
        // while the database provides the ordering.
        let mut pages = worker_entity::Entity::find()
            .filter(worker_entity::Column::Started.eq(true))
            .order_by_with_nulls(
                worker_entity::Column::LastWorkAt,
                Order::Asc,
                NullOrdering::First,
            )
            .order_by_asc(worker_entity::Column::CreatedAt)
            .order_by_asc(worker_entity::Column::Id)
            .paginate(self.db.as_ref(), DUE_SCAN_PAGE_SIZE.max(limit));

        let mut due = Vec::new();
        while let Some(models) = pages.fetch_and_next().await? {
            for model in models {
                let worker: Worker = model.into();
                if worker.is_due(now) {
                    due.push(worker);
                    if due.len() as u64 >= limit {
                        return Ok(due);
                    }
                }
            }
        }

        Ok(due)
    }

    async fn set_started(
        &self,
        id: Uuid,
        started: bool,
    ) -> Result<Option<Worker>, RepositoryError> {
        let result = worker_entity::Entity::update_many()
            .col_expr(worker_entity::Column::Started, Expr::value(started))
            .filter(worker_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn set_last_work_at(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = worker_entity::Entity::update_many()
            .col_expr(
                worker_entity::Column::LastWorkAt,
                Expr::value(at.fixed_offset()),
            )
            .filter(worker_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = worker_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[path = "worker_repo_impl_test.rs"]
mod tests;
