// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::utils::errors::{RepositoryError, ServiceError};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 内部错误只写日志，响应中不包含细节。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<ServiceError>() {
            return match err {
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::DuplicateName(_) => StatusCode::CONFLICT,
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        match self.0.downcast_ref::<RepositoryError>() {
            Some(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {:#}", self.0);
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
