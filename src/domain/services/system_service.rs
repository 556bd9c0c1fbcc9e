// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::data_repository::DataRepository;
use crate::domain::repositories::worker_repository::WorkerRepository;
use crate::domain::services::worker_service::PROCESS_WORKERS_JOB;
use crate::scheduler::Scheduler;
use crate::utils::errors::ServiceError;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// 运行状态统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub workers: u64,
    pub started_workers: u64,
    pub data: u64,
    /// 调度周期是否正在执行，任务未注册时为 `false`
    pub process_workers_running: bool,
    pub uptime_seconds: u64,
}

/// 系统状态服务
pub struct SystemService {
    worker_repo: Arc<dyn WorkerRepository>,
    data_repo: Arc<dyn DataRepository>,
    scheduler: Arc<Scheduler>,
    started_at: Instant,
}

impl SystemService {
    pub fn new(
        worker_repo: Arc<dyn WorkerRepository>,
        data_repo: Arc<dyn DataRepository>,
        scheduler: Arc<Scheduler>,
    ) -> Self {
        Self {
            worker_repo,
            data_repo,
            scheduler,
            started_at: Instant::now(),
        }
    }

    pub async fn get_stats(&self) -> Result<SystemStats, ServiceError> {
        Ok(SystemStats {
            workers: self.worker_repo.count(None).await?,
            started_workers: self.worker_repo.count(Some(true)).await?,
            data: self.data_repo.count().await?,
            process_workers_running: self
                .scheduler
                .is_running(PROCESS_WORKERS_JOB)
                .unwrap_or(false),
            uptime_seconds: self.started_at.elapsed().as_secs(),
        })
    }
}
