// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::anyhow;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

/// 并行任务执行器
///
/// 以不超过 `max_workers` 的并发度执行一批带键的任务，等待全部完成
/// 或整体超时。单个任务失败或 panic 只记录到它自己的键下，不影响其他任务。
pub struct ParallelTasks<T> {
    max_workers: usize,
    timeout: Option<Duration>,
    tasks: Vec<(String, BoxFuture<'static, anyhow::Result<T>>)>,
}

/// 并行任务的执行结果
#[derive(Debug)]
pub struct ParallelTasksResult<T> {
    /// 成功任务的返回值
    pub results: HashMap<String, T>,
    /// 失败任务的错误
    pub exceptions: HashMap<String, anyhow::Error>,
    /// 是否有任何任务失败或超时
    pub error: bool,
    /// 是否发生了整体超时
    pub timeout_error: bool,
}

impl<T> Default for ParallelTasksResult<T> {
    fn default() -> Self {
        Self {
            results: HashMap::new(),
            exceptions: HashMap::new(),
            error: false,
            timeout_error: false,
        }
    }
}

impl<T: Send + 'static> ParallelTasks<T> {
    /// 创建执行器
    ///
    /// # 参数
    ///
    /// * `max_workers` - 最大并发数，0 按 1 处理
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            timeout: None,
            tasks: Vec::new(),
        }
    }

    /// 设置整体超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 添加任务，键重复时后完成的结果覆盖先完成的
    pub fn add_task<F>(&mut self, key: impl Into<String>, task: F)
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.tasks.push((key.into(), task.boxed()));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 执行所有任务
    ///
    /// 所有任务立即派发，由信号量控制同时运行的数量。超时后仍在运行的任务
    /// 被分离到后台继续执行，结果不再收集。
    pub async fn execute(self) -> ParallelTasksResult<T> {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut join_set = JoinSet::new();

        debug!(
            "Dispatching {} tasks with max_workers={}",
            self.tasks.len(),
            self.max_workers
        );

        for (key, task) in self.tasks {
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let outcome = async {
                    let _permit = semaphore.acquire_owned().await?;
                    match AssertUnwindSafe(task).catch_unwind().await {
                        Ok(result) => result,
                        Err(panic) => Err(anyhow!("task panicked: {}", panic_message(&*panic))),
                    }
                }
                .await;
                (key, outcome)
            });
        }

        let mut result = ParallelTasksResult::default();
        loop {
            let joined = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, join_set.join_next()).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            warn!("{} tasks still running at the deadline", join_set.len());
                            result.error = true;
                            result.timeout_error = true;
                            join_set.detach_all();
                            break;
                        }
                    }
                }
                None => join_set.join_next().await,
            };

            match joined {
                Some(Ok((key, Ok(value)))) => {
                    result.results.insert(key, value);
                }
                Some(Ok((key, Err(e)))) => {
                    result.error = true;
                    result.exceptions.insert(key, e);
                }
                Some(Err(e)) => {
                    // Only reachable if the runtime cancels the task
                    warn!("Parallel task was cancelled: {}", e);
                    result.error = true;
                }
                None => break,
            }
        }

        result
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "parallel_tasks_test.rs"]
mod tests;
