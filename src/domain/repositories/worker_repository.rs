// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::worker::Worker;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Worker仓库特质
///
/// 每个方法都是一次原子的单记录读写，调用方不依赖跨方法的事务
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// 创建新 worker，名称冲突时返回 `AlreadyExists`
    async fn create(&self, worker: &Worker) -> Result<Worker, RepositoryError>;
    /// 根据ID查找
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, RepositoryError>;
    /// 根据名称查找
    async fn find_by_name(&self, name: &str) -> Result<Option<Worker>, RepositoryError>;
    /// 按创建时间倒序列出，可按启动状态过滤
    async fn list(&self, started: Option<bool>, limit: u64)
        -> Result<Vec<Worker>, RepositoryError>;
    /// 统计 worker 数量，可按启动状态过滤
    async fn count(&self, started: Option<bool>) -> Result<u64, RepositoryError>;
    /// 查找在 `now` 时刻到期的 worker
    ///
    /// 按 `last_work_at` 升序（空值优先），再按 `created_at` 升序，最多返回 `limit` 个
    async fn find_due(&self, now: DateTime<Utc>, limit: u64)
        -> Result<Vec<Worker>, RepositoryError>;
    /// 设置启动状态，返回更新后的记录
    async fn set_started(&self, id: Uuid, started: bool)
        -> Result<Option<Worker>, RepositoryError>;
    /// 记录最近一次执行时间，worker 已被删除时返回 `false`
    async fn set_last_work_at(&self, id: Uuid, at: DateTime<Utc>)
        -> Result<bool, RepositoryError>;
    /// 删除 worker，返回是否确实删除了记录
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
