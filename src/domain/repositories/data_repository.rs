// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::data::{Data, DataStatus};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 数据记录仓库特质
///
/// 只追加，核心逻辑不更新也不删除记录
#[async_trait]
pub trait DataRepository: Send + Sync {
    /// 追加一条记录
    async fn insert(&self, data: &Data) -> Result<(), RepositoryError>;
    /// 按创建时间倒序查询
    async fn find(
        &self,
        worker: Option<&str>,
        status: Option<DataStatus>,
        limit: u64,
    ) -> Result<Vec<Data>, RepositoryError>;
    /// 统计某个 worker 的记录数
    async fn count_by_worker(&self, worker: &str) -> Result<u64, RepositoryError>;
    /// 记录总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
