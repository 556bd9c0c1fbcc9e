// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 机器人配置服务（bot_service）：全局超时和并发上限的单例配置
/// - 数据服务（data_service）：抓取结果的历史查询
/// - 结果归类（outcome_classifier）：把一次抓取归类为数据记录
/// - 系统状态服务（system_service）：数量统计和调度周期状态
/// - Worker 服务（worker_service）：worker 管理和轮询执行引擎
pub mod bot_service;
pub mod data_service;
pub mod outcome_classifier;
pub mod system_service;
pub mod worker_service;
