// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::data::{Data, DataQuery};
use crate::domain::services::data_service::DataService;
use crate::presentation::errors::AppError;
use axum::{extract::Query, Extension, Json};
use std::sync::Arc;

/// 查询抓取结果，最新的在前
pub async fn find_data(
    Extension(service): Extension<Arc<DataService>>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Vec<Data>>, AppError> {
    Ok(Json(service.find(&query).await?))
}
