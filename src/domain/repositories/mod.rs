// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层使用的存储接口，由基础设施层实现
pub mod bot_repository;
pub mod data_repository;
pub mod worker_repository;
