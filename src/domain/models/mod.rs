// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 包含 worker、数据记录和全局机器人配置
pub mod bot;
pub mod data;
pub mod worker;
