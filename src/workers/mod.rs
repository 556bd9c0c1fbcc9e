// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供执行引擎使用的并发原语
/// 包括按键互斥锁和有界并发的并行任务执行器
pub mod keyed_lock;
pub mod parallel_tasks;

pub use keyed_lock::KeyedLock;
pub use parallel_tasks::{ParallelTasks, ParallelTasksResult};
