// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 按键互斥锁
///
/// 每个键对应一把按需创建的异步互斥锁。同一个键同时只有一个持有者，
/// 后来者等待释放后继续。最后一个持有者释放且没有等待者时，锁从表中移除。
#[derive(Debug)]
pub struct KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }
}

impl<K> KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取指定键的锁，必要时等待
    ///
    /// # 参数
    ///
    /// * `key` - 锁的键
    ///
    /// # 返回值
    ///
    /// 返回锁守卫，守卫析构时释放锁
    pub async fn lock(&self, key: K) -> KeyedLockGuard<K> {
        let mutex = self.get_or_create(&key);
        let guard = mutex.lock_owned().await;
        KeyedLockGuard {
            key,
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// 指定键当前是否被持有
    pub fn is_locked(&self, key: &K) -> bool {
        self.locks
            .get(key)
            .map(|mutex| mutex.try_lock().is_err())
            .unwrap_or(false)
    }

    /// 当前表中锁的数量（被持有或有等待者）
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn get_or_create(&self, key: &K) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// 按键锁守卫
pub struct KeyedLockGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyedLockGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        // Release first so the guard's own reference is gone before counting
        drop(self.guard.take());
        // Waiters hold a clone of the Arc, so only the map's reference means uncontended
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
