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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的浏览器 User-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:80.0) Gecko/20100101 Firefox/80.0";

/// 应用程序配置设置
///
/// 包含数据库、服务器、调度器、机器人默认值、HTTP客户端和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 调度器配置
    pub scheduler: SchedulerSettings,
    /// 机器人全局配置的初始值
    pub bot: BotSettings,
    /// HTTP 抓取客户端配置
    pub http: HttpSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// API 访问令牌，为空时所有受保护路由都拒绝访问
    pub access_token: String,
}

/// 调度器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// 驱动循环的节拍（毫秒）
    pub tick_ms: u64,
    /// 两次 process_workers 周期之间的间隔（秒）
    pub process_workers_interval: u64,
}

/// 机器人配置的默认值
///
/// 仅在数据库中还不存在单例记录时使用
#[derive(Debug, Clone, Deserialize)]
pub struct BotSettings {
    /// 每次抓取的超时时间（秒）
    pub timeout: i64,
    /// 每个周期内最多并发执行的 worker 数
    pub worker_limit: i64,
}

/// HTTP 客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 代理地址 (可选)
    pub proxy: Option<String>,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启动 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub listen: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 默认过滤级别，`RUST_LOG` 存在时被覆盖
    pub level: String,
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `POLLBOT__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("POLLBOT").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database.url", "sqlite://pollbot.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.access_token", "")?
            .set_default("scheduler.tick_ms", 500)?
            .set_default("scheduler.process_workers_interval", 2)?
            .set_default("bot.timeout", 10)?
            .set_default("bot.worker_limit", 15)?
            .set_default("http.user_agent", DEFAULT_USER_AGENT)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen", "0.0.0.0:9000")?
            .set_default("log.level", "info,pollbot=debug")?
            .set_default("log.json", false)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
