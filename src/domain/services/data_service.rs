// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::data::{Data, DataQuery};
use crate::domain::repositories::data_repository::DataRepository;
use crate::utils::errors::ServiceError;
use std::sync::Arc;

pub const DEFAULT_DATA_LIMIT: u64 = 100;
const MAX_DATA_LIMIT: u64 = 1000;

/// 抓取结果查询服务
pub struct DataService {
    repo: Arc<dyn DataRepository>,
}

impl DataService {
    pub fn new(repo: Arc<dyn DataRepository>) -> Self {
        Self { repo }
    }

    /// 按创建时间倒序查询，可按 worker 名称和状态过滤
    pub async fn find(&self, query: &DataQuery) -> Result<Vec<Data>, ServiceError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_DATA_LIMIT)
            .clamp(1, MAX_DATA_LIMIT);
        let worker = query.worker.as_deref().filter(|w| !w.is_empty());

        Ok(self.repo.find(worker, query.status, limit).await?)
    }
}
