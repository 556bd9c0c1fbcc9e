// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 调度模块
///
/// 按固定节拍检查已注册的周期任务，同一任务不会重叠执行
pub mod cycle_scheduler;

pub use cycle_scheduler::Scheduler;
