// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use pollbot::config::settings::Settings;
use pollbot::domain::services::bot_service::BotService;
use pollbot::domain::services::data_service::DataService;
use pollbot::domain::services::system_service::SystemService;
use pollbot::domain::services::worker_service::{WorkerService, PROCESS_WORKERS_JOB};
use pollbot::engines::reqwest_fetcher::ReqwestFetcher;
use pollbot::engines::traits::HttpFetcher;
use pollbot::infrastructure::database::connection;
use pollbot::infrastructure::metrics;
use pollbot::infrastructure::repositories::bot_repo_impl::BotRepositoryImpl;
use pollbot::infrastructure::repositories::data_repo_impl::DataRepositoryImpl;
use pollbot::infrastructure::repositories::worker_repo_impl::WorkerRepositoryImpl;
use pollbot::presentation::middleware::auth_middleware::AuthState;
use pollbot::presentation::routes;
use pollbot::scheduler::Scheduler;
use pollbot::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.log);
    info!("Starting pollbot...");

    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Initialize services
    let worker_repo = Arc::new(WorkerRepositoryImpl::new(db.clone()));
    let data_repo = Arc::new(DataRepositoryImpl::new(db.clone()));
    let bot_repo = Arc::new(BotRepositoryImpl::new(db.clone()));

    let bot_service = Arc::new(BotService::init(bot_repo, &settings.bot).await?);
    let fetcher = Arc::new(ReqwestFetcher::new(&settings.http)?);
    info!("HTTP fetcher: {}", fetcher.name());
    let worker_service = Arc::new(WorkerService::new(
        worker_repo.clone(),
        data_repo.clone(),
        bot_service.clone(),
        fetcher,
    ));
    let data_service = Arc::new(DataService::new(data_repo.clone()));

    // 5. Start scheduler
    let scheduler = Arc::new(Scheduler::new(Duration::from_millis(
        settings.scheduler.tick_ms,
    )));
    let cycle_service = worker_service.clone();
    scheduler.add_job(
        PROCESS_WORKERS_JOB,
        Duration::from_secs(settings.scheduler.process_workers_interval),
        move || {
            let service = cycle_service.clone();
            async move {
                service.process_workers().await?;
                anyhow::Ok(())
            }
        },
    );
    let scheduler_handle = scheduler.start();
    info!("Scheduler started");
    let system_service = Arc::new(SystemService::new(
        worker_repo,
        data_repo,
        scheduler.clone(),
    ));

    // 6. Start HTTP server
    let app = routes::routes(
        worker_service,
        data_service,
        bot_service,
        system_service,
        AuthState::new(settings.server.access_token.as_str()),
    );
    if settings.server.access_token.is_empty() {
        warn!("server.access_token is empty, all /api routes will be rejected");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    let shutdown_scheduler = scheduler.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
            shutdown_scheduler.stop();
        })
        .await?;

    scheduler.stop();
    scheduler_handle.await?;
    info!("pollbot stopped");

    Ok(())
}
