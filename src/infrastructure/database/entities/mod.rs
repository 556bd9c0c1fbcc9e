// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 使用SeaORM框架定义 bot、workers、data 三张表的实体
pub mod bot;
pub mod data;
pub mod worker;
