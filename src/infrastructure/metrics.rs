// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

pub const WORK_TOTAL: &str = "pollbot_work_total";
pub const CYCLES_TOTAL: &str = "pollbot_cycles_total";
pub const CYCLE_DURATION_SECONDS: &str = "pollbot_cycle_duration_seconds";

/// 初始化指标系统
///
/// 未启用时不安装记录器，`counter!` 等宏退化为空操作。
/// 监听地址无效或端口被占用只记录警告，不影响服务启动。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics listen address '{}': {}", settings.listen, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(WORK_TOTAL, "Total number of worker runs, labelled by outcome status");
    describe_counter!(CYCLES_TOTAL, "Total number of scheduling cycles that dispatched work");
    describe_histogram!(
        CYCLE_DURATION_SECONDS,
        "Duration of scheduling cycles in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}
