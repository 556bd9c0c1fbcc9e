// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::bot::{Bot, UpdateBotParams};
use crate::domain::services::bot_service::BotService;
use crate::presentation::errors::AppError;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn get_bot(Extension(service): Extension<Arc<BotService>>) -> Json<Bot> {
    Json(service.get())
}

pub async fn update_bot(
    Extension(service): Extension<Arc<BotService>>,
    Json(params): Json<UpdateBotParams>,
) -> Result<Json<Bot>, AppError> {
    Ok(Json(service.update(params).await?))
}

pub async fn start_bot(
    Extension(service): Extension<Arc<BotService>>,
) -> Result<Json<Bot>, AppError> {
    Ok(Json(service.start().await?))
}

pub async fn stop_bot(
    Extension(service): Extension<Arc<BotService>>,
) -> Result<Json<Bot>, AppError> {
    Ok(Json(service.stop().await?))
}
