// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::worker::{CreateWorkerParams, Worker};
use crate::domain::repositories::data_repository::DataRepository;
use crate::domain::repositories::worker_repository::WorkerRepository;
use crate::domain::services::bot_service::BotService;
use crate::domain::services::outcome_classifier;
use crate::engines::traits::HttpFetcher;
use crate::infrastructure::metrics::{CYCLES_TOTAL, CYCLE_DURATION_SECONDS, WORK_TOTAL};
use crate::utils::errors::{RepositoryError, ServiceError};
use crate::workers::{KeyedLock, ParallelTasks};
use chrono::Utc;
use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_LIST_LIMIT: u64 = 100;
/// 调度周期在调度器中注册的任务名
pub const PROCESS_WORKERS_JOB: &str = "process_workers";

/// 一次调度周期的执行摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 选中的 worker 数量
    pub selected: usize,
    /// 实际执行的数量
    pub executed: usize,
    /// 执行前发现已停止或已删除而跳过的数量
    pub skipped: usize,
    /// 执行时出错的数量
    pub failed: usize,
}

/// Worker 服务
///
/// 负责 worker 的增删改查，以及轮询执行引擎：
/// 选择到期的 worker、按 worker 加锁执行一次抓取、并行派发一个周期。
pub struct WorkerService {
    worker_repo: Arc<dyn WorkerRepository>,
    data_repo: Arc<dyn DataRepository>,
    bot_service: Arc<BotService>,
    fetcher: Arc<dyn HttpFetcher>,
    work_locks: KeyedLock<Uuid>,
    create_lock: Mutex<()>,
    cycle_lock: Mutex<()>,
}

impl WorkerService {
    pub fn new(
        worker_repo: Arc<dyn WorkerRepository>,
        data_repo: Arc<dyn DataRepository>,
        bot_service: Arc<BotService>,
        fetcher: Arc<dyn HttpFetcher>,
    ) -> Self {
        Self {
            worker_repo,
            data_repo,
            bot_service,
            fetcher,
            work_locks: KeyedLock::new(),
            create_lock: Mutex::new(()),
            cycle_lock: Mutex::new(()),
        }
    }

    /// 创建 worker
    ///
    /// 名称已存在时返回 `DuplicateName`，新 worker 处于停止状态
    pub async fn create_worker(&self, params: CreateWorkerParams) -> Result<Worker, ServiceError> {
        params.validate()?;

        let _guard = self.create_lock.lock().await;
        if self.worker_repo.find_by_name(&params.name).await?.is_some() {
            return Err(ServiceError::DuplicateName(params.name));
        }

        let worker = Worker::new(params.name, params.source, params.interval);
        match self.worker_repo.create(&worker).await {
            Ok(created) => {
                info!("Created worker {} ({})", created.name, created.id);
                Ok(created)
            }
            // 多实例部署时由唯一索引兜底
            Err(RepositoryError::AlreadyExists(_)) => Err(ServiceError::DuplicateName(worker.name)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_workers(
        &self,
        started: Option<bool>,
        limit: Option<u64>,
    ) -> Result<Vec<Worker>, ServiceError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);
        Ok(self.worker_repo.list(started, limit).await?)
    }

    pub async fn get_worker(&self, id: Uuid) -> Result<Worker, ServiceError> {
        self.worker_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("worker {}", id)))
    }

    /// 删除 worker，历史数据保留
    pub async fn delete_worker(&self, id: Uuid) -> Result<bool, ServiceError> {
        let deleted = self.worker_repo.delete(id).await?;
        if deleted {
            info!("Deleted worker {}", id);
        }
        Ok(deleted)
    }

    pub async fn start_worker(&self, id: Uuid) -> Result<Worker, ServiceError> {
        self.set_started(id, true).await
    }

    pub async fn stop_worker(&self, id: Uuid) -> Result<Worker, ServiceError> {
        self.set_started(id, false).await
    }

    async fn set_started(&self, id: Uuid, started: bool) -> Result<Worker, ServiceError> {
        self.worker_repo
            .set_started(id, started)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("worker {}", id)))
    }

    /// 查找当前到期的 worker，数量不超过 `worker_limit`
    pub async fn find_for_work(&self) -> Result<Vec<Worker>, ServiceError> {
        let limit = self.bot_service.get().worker_limit() as u64;
        Ok(self.worker_repo.find_due(Utc::now(), limit).await?)
    }

    /// 执行一次 worker
    ///
    /// 同一个 worker 同时只有一个执行。加锁后重新读取 worker，
    /// 已删除或已停止时返回 `Ok(false)`，否则抓取、归类、写入数据、
    /// 更新 `last_work_at` 后返回 `Ok(true)`。
    #[instrument(skip(self))]
    pub async fn work(&self, id: Uuid) -> Result<bool, ServiceError> {
        let _guard = self.work_locks.lock(id).await;
        debug!("work({})", id);

        let worker = match self.worker_repo.find_by_id(id).await? {
            Some(worker) if worker.started => worker,
            _ => {
                debug!("Worker {} is gone or stopped, skipping", id);
                return Ok(false);
            }
        };

        let timeout = self.bot_service.get().timeout_duration();
        let response = self.fetcher.fetch(&worker.source, timeout).await;
        let data = outcome_classifier::classify(&worker.name, &response);
        debug!(
            "Worker {} fetched {} -> {} ({})",
            worker.name, worker.source, data.status, response.status
        );
        counter!(WORK_TOTAL, "status" => data.status.as_str()).increment(1);

        self.data_repo.insert(&data).await?;
        if !self.worker_repo.set_last_work_at(id, Utc::now()).await? {
            warn!("Worker {} was deleted while running", worker.name);
        }

        Ok(true)
    }

    /// 执行一个调度周期
    ///
    /// 选出到期的 worker，并行执行，并发度为当前的 `worker_limit`。
    /// 单个 worker 失败只记录日志，不影响其他 worker。
    pub async fn process_workers(self: &Arc<Self>) -> Result<CycleReport, ServiceError> {
        let _guard = self.cycle_lock.lock().await;
        debug!("process_workers()");

        let bot = self.bot_service.get();
        let workers = self
            .worker_repo
            .find_due(Utc::now(), bot.worker_limit() as u64)
            .await?;
        if workers.is_empty() {
            return Ok(CycleReport::default());
        }

        let started_at = Instant::now();
        let mut tasks = ParallelTasks::new(bot.worker_limit());
        for worker in &workers {
            let service = Arc::clone(self);
            let id = worker.id;
            tasks.add_task(format!("work_{}", worker.name), async move {
                service.work(id).await.map_err(anyhow::Error::from)
            });
        }

        let result = tasks.execute().await;
        for (key, e) in &result.exceptions {
            error!("Task {} failed: {:#}", key, e);
        }

        let executed = result.results.values().filter(|ran| **ran).count();
        let report = CycleReport {
            selected: workers.len(),
            executed,
            skipped: result.results.len() - executed,
            failed: result.exceptions.len(),
        };

        counter!(CYCLES_TOTAL).increment(1);
        histogram!(CYCLE_DURATION_SECONDS).record(started_at.elapsed().as_secs_f64());
        debug!("Cycle finished: {:?}", report);

        Ok(report)
    }
}

#[cfg(test)]
#[path = "worker_service_test.rs"]
mod tests;
