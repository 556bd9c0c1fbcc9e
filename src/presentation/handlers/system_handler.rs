// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::system_service::{SystemService, SystemStats};
use crate::presentation::errors::AppError;
use axum::{Extension, Json};
use std::sync::Arc;

/// 运行状态统计
pub async fn get_stats(
    Extension(service): Extension<Arc<SystemService>>,
) -> Result<Json<SystemStats>, AppError> {
    Ok(Json(service.get_stats().await?))
}
