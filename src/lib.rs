// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// HTTP 抓取客户端
pub mod engines;

/// 基础设施模块
///
/// 提供数据库、仓库实现和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 调度模块
///
/// 周期任务的驱动循环
pub mod scheduler;

/// 工具模块
///
/// 错误类型和日志初始化
pub mod utils;

/// 工作器模块
///
/// 按键互斥锁和并行任务执行器
pub mod workers;
