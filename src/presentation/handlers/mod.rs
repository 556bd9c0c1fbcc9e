// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 处理器模块
///
/// 包含所有HTTP请求处理器，负责处理API请求并返回响应
pub mod bot_handler;
pub mod data_handler;
pub mod system_handler;
pub mod worker_handler;
