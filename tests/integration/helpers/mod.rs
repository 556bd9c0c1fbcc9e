// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use pollbot::config::settings::{BotSettings, HttpSettings, DEFAULT_USER_AGENT};
use pollbot::domain::repositories::data_repository::DataRepository;
use pollbot::domain::repositories::worker_repository::WorkerRepository;
use pollbot::domain::services::bot_service::BotService;
use pollbot::domain::services::data_service::DataService;
use pollbot::domain::services::system_service::SystemService;
use pollbot::domain::services::worker_service::{WorkerService, PROCESS_WORKERS_JOB};
use pollbot::engines::reqwest_fetcher::ReqwestFetcher;
use pollbot::engines::traits::HttpFetcher;
use pollbot::infrastructure::database::connection;
use pollbot::infrastructure::repositories::bot_repo_impl::BotRepositoryImpl;
use pollbot::infrastructure::repositories::data_repo_impl::DataRepositoryImpl;
use pollbot::infrastructure::repositories::worker_repo_impl::WorkerRepositoryImpl;
use pollbot::presentation::middleware::auth_middleware::AuthState;
use pollbot::presentation::routes;
use pollbot::scheduler::Scheduler;
use std::sync::Arc;
use std::time::Duration;

pub const ACCESS_TOKEN: &str = "test-token";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub worker_service: Arc<WorkerService>,
    pub bot_service: Arc<BotService>,
    pub worker_repo: Arc<dyn WorkerRepository>,
    pub data_repo: Arc<dyn DataRepository>,
    pub scheduler: Arc<Scheduler>,
}

/// 使用真实 reqwest 客户端和内存 SQLite 创建测试应用
pub async fn create_test_app() -> TestApp {
    let fetcher = ReqwestFetcher::new(&HttpSettings {
        user_agent: DEFAULT_USER_AGENT.to_string(),
        proxy: None,
    })
    .unwrap();
    create_test_app_with_fetcher(Arc::new(fetcher)).await
}

pub async fn create_test_app_with_fetcher(fetcher: Arc<dyn HttpFetcher>) -> TestApp {
    let db = Arc::new(connection::in_memory().await.unwrap());

    let worker_repo: Arc<dyn WorkerRepository> = Arc::new(WorkerRepositoryImpl::new(db.clone()));
    let data_repo: Arc<dyn DataRepository> = Arc::new(DataRepositoryImpl::new(db.clone()));
    let bot_service = Arc::new(
        BotService::init(
            Arc::new(BotRepositoryImpl::new(db)),
            &BotSettings {
                timeout: 2,
                worker_limit: 15,
            },
        )
        .await
        .unwrap(),
    );
    let worker_service = Arc::new(WorkerService::new(
        worker_repo.clone(),
        data_repo.clone(),
        bot_service.clone(),
        fetcher,
    ));
    let data_service = Arc::new(DataService::new(data_repo.clone()));

    // 注册但不启动,周期由测试显式驱动
    let scheduler = Arc::new(Scheduler::new(Duration::from_millis(50)));
    let cycle_service = worker_service.clone();
    scheduler.add_job(PROCESS_WORKERS_JOB, Duration::from_secs(60), move || {
        let service = cycle_service.clone();
        async move {
            service.process_workers().await?;
            anyhow::Ok(())
        }
    });
    let system_service = Arc::new(SystemService::new(
        worker_repo.clone(),
        data_repo.clone(),
        scheduler.clone(),
    ));

    let app = routes::routes(
        worker_service.clone(),
        data_service,
        bot_service.clone(),
        system_service,
        AuthState::new(ACCESS_TOKEN),
    );
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        worker_service,
        bot_service,
        worker_repo,
        data_repo,
        scheduler,
    }
}
