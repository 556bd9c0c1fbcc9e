// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::worker::{CreateWorkerParams, Worker};
use crate::domain::services::worker_service::{CycleReport, WorkerService};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListWorkersQuery {
    pub started: Option<bool>,
    pub limit: Option<u64>,
}

/// 按创建时间倒序列出 worker
pub async fn list_workers(
    Extension(service): Extension<Arc<WorkerService>>,
    Query(query): Query<ListWorkersQuery>,
) -> Result<Json<Vec<Worker>>, AppError> {
    let workers = service.list_workers(query.started, query.limit).await?;
    Ok(Json(workers))
}

pub async fn create_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Json(payload): Json<CreateWorkerParams>,
) -> Result<(StatusCode, Json<Worker>), AppError> {
    let worker = service.create_worker(payload).await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

pub async fn get_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Worker>, AppError> {
    Ok(Json(service.get_worker(id).await?))
}

/// 删除 worker，返回是否确实删除
pub async fn delete_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<bool>, AppError> {
    Ok(Json(service.delete_worker(id).await?))
}

pub async fn start_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Worker>, AppError> {
    Ok(Json(service.start_worker(id).await?))
}

pub async fn stop_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Worker>, AppError> {
    Ok(Json(service.stop_worker(id).await?))
}

/// 立即执行一次 worker，跳过时返回 `false`
pub async fn work_worker(
    Extension(service): Extension<Arc<WorkerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<bool>, AppError> {
    Ok(Json(service.work(id).await?))
}

/// 立即执行一个调度周期
pub async fn process_workers(
    Extension(service): Extension<Arc<WorkerService>>,
) -> Result<Json<CycleReport>, AppError> {
    Ok(Json(service.process_workers().await?))
}
