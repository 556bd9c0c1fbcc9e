// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::bot_service::BotService;
use crate::domain::services::data_service::DataService;
use crate::domain::services::system_service::SystemService;
use crate::domain::services::worker_service::WorkerService;
use crate::presentation::handlers::{bot_handler, data_handler, system_handler, worker_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// `/health` 和 `/version` 公开访问，`/api` 下的路由需要访问令牌
pub fn routes(
    worker_service: Arc<WorkerService>,
    data_service: Arc<DataService>,
    bot_service: Arc<BotService>,
    system_service: Arc<SystemService>,
    auth_state: AuthState,
) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let protected_routes = Router::new()
        .route(
            "/api/workers",
            get(worker_handler::list_workers).post(worker_handler::create_worker),
        )
        .route("/api/workers/process", post(worker_handler::process_workers))
        .route(
            "/api/workers/{id}",
            get(worker_handler::get_worker).delete(worker_handler::delete_worker),
        )
        .route("/api/workers/{id}/start", post(worker_handler::start_worker))
        .route("/api/workers/{id}/stop", post(worker_handler::stop_worker))
        .route("/api/workers/{id}/work", post(worker_handler::work_worker))
        .route("/api/data", get(data_handler::find_data))
        .route(
            "/api/bot",
            get(bot_handler::get_bot).put(bot_handler::update_bot),
        )
        .route("/api/bot/start", post(bot_handler::start_bot))
        .route("/api/bot/stop", post(bot_handler::stop_bot))
        .route("/api/system", get(system_handler::get_stats))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(worker_service))
        .layer(Extension(data_service))
        .layer(Extension(bot_service))
        .layer(Extension(system_service))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
