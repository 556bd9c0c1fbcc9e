// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Record not found")]
    NotFound,

    #[error("Record already exists: {0}")]
    AlreadyExists(String),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => RepositoryError::AlreadyExists(msg),
            _ => RepositoryError::Database(err),
        }
    }
}

/// 服务层错误类型
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 名称冲突
    #[error("a worker with the name '{0}' exists already")]
    DuplicateName(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// 参数校验失败
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}
