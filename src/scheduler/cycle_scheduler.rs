// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

type JobFn = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// 周期任务
struct Job {
    name: String,
    interval: Duration,
    func: JobFn,
    is_running: AtomicBool,
    last_run_start: Mutex<Instant>,
}

impl Job {
    /// 到期且未在运行时标记为运行中并记录开始时间
    fn try_begin(&self, now: Instant) -> bool {
        let mut last_run_start = self.last_run_start.lock();
        if now.duration_since(*last_run_start) < self.interval {
            return false;
        }
        if self
            .is_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        *last_run_start = now;
        true
    }
}

/// 周期任务调度器
///
/// 驱动循环每个节拍检查一次所有任务，到期的任务在独立的 tokio 任务中执行。
/// 任务返回错误或 panic 只记录日志，不会中断驱动循环。
pub struct Scheduler {
    tick: Duration,
    jobs: Arc<RwLock<Vec<Arc<Job>>>>,
    token: CancellationToken,
}

impl Scheduler {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            jobs: Arc::new(RwLock::new(Vec::new())),
            token: CancellationToken::new(),
        }
    }

    /// 注册周期任务，首次执行在注册后一个周期
    pub fn add_job<F, Fut>(&self, name: impl Into<String>, interval: Duration, func: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let job = Job {
            name: name.into(),
            interval,
            func: Arc::new(move || func().boxed()),
            is_running: AtomicBool::new(false),
            last_run_start: Mutex::new(Instant::now()),
        };
        info!("Registered job {} every {:?}", job.name, interval);
        self.jobs.write().push(Arc::new(job));
    }

    /// 启动驱动循环
    pub fn start(&self) -> JoinHandle<()> {
        let jobs = self.jobs.clone();
        let token = self.token.clone();
        let tick = self.tick;

        tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let now = Instant::now();
                let due: Vec<Arc<Job>> = jobs
                    .read()
                    .iter()
                    .filter(|job| job.try_begin(now))
                    .cloned()
                    .collect();

                for job in due {
                    tokio::spawn(run_job(job, token.clone()));
                }
            }

            info!("Scheduler stopped");
        })
    }

    /// 停止驱动循环，正在执行的任务会继续运行到结束
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 任务是否正在执行，未注册时返回 `None`
    pub fn is_running(&self, name: &str) -> Option<bool> {
        self.jobs
            .read()
            .iter()
            .find(|job| job.name == name)
            .map(|job| job.is_running.load(Ordering::Acquire))
    }
}

async fn run_job(job: Arc<Job>, token: CancellationToken) {
    if !token.is_cancelled() {
        debug!("Running job {}", job.name);
        match tokio::spawn((job.func)()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Scheduler job {} failed: {:#}", job.name, e),
            Err(e) if e.is_panic() => error!("Scheduler job {} panicked", job.name),
            Err(e) => error!("Scheduler job {} was cancelled: {}", job.name, e),
        }
    }
    job.is_running.store(false, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Counters {
        runs: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_waits_one_interval() {
        let counters = Arc::new(Counters::default());
        let scheduler = Scheduler::new(Duration::from_millis(100));
        let c = counters.clone();
        scheduler.add_job("job", Duration::from_secs(1), move || {
            let c = c.clone();
            async move {
                c.runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(850)).await;
        assert_eq!(counters.runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(counters.runs.load(Ordering::SeqCst), 1);

        scheduler.stop();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_job_never_overlaps_itself() {
        let counters = Arc::new(Counters::default());
        let scheduler = Scheduler::new(Duration::from_millis(100));
        let c = counters.clone();
        scheduler.add_job("slow", Duration::from_secs(1), move || {
            let c = c.clone();
            async move {
                let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                c.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2500)).await;
                c.in_flight.fetch_sub(1, Ordering::SeqCst);
                c.runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_secs(10)).await;
        scheduler.stop();
        handle.await.unwrap();

        assert_eq!(counters.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(counters.runs.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_and_panics_do_not_stop_the_loop() {
        let counters = Arc::new(Counters::default());
        let scheduler = Scheduler::new(Duration::from_millis(100));
        let c = counters.clone();
        scheduler.add_job("flaky", Duration::from_secs(1), move || {
            let c = c.clone();
            async move {
                let run = c.runs.fetch_add(1, Ordering::SeqCst);
                if run % 2 == 0 {
                    panic!("flaky job panicked on run {}", run);
                }
                Err(anyhow!("flaky job failed on run {}", run))
            }
        });
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(4500)).await;

        assert!(counters.runs.load(Ordering::SeqCst) >= 3);
        assert_eq!(scheduler.is_running("flaky"), Some(false));
        assert_eq!(scheduler.is_running("missing"), None);

        scheduler.stop();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_runs() {
        let counters = Arc::new(Counters::default());
        let scheduler = Scheduler::new(Duration::from_millis(100));
        let c = counters.clone();
        scheduler.add_job("job", Duration::from_secs(1), move || {
            let c = c.clone();
            async move {
                c.runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        let handle = scheduler.start();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        scheduler.stop();
        handle.await.unwrap();
        let runs = counters.runs.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(scheduler.is_stopped());
        assert_eq!(counters.runs.load(Ordering::SeqCst), runs);
    }
}
