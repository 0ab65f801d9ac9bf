use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::cache::PostCache;
use crate::database::Post;

/// 进程内帖子缓存，按最近最少使用淘汰，写入后固定时间过期
#[derive(Clone)]
pub struct MemoryPostCache {
    entries: Cache<i64, Arc<Vec<Post>>>,
}

impl MemoryPostCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    /// 立即执行挂起的淘汰和过期清理
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

#[async_trait]
impl PostCache for MemoryPostCache {
    async fn get(&self, user_id: i64) -> Option<Vec<Post>> {
        self.entries
            .get(&user_id)
            .await
            .map(|posts| posts.as_ref().clone())
    }

    async fn put(&self, user_id: i64, posts: Vec<Post>) {
        self.entries.insert(user_id, Arc::new(posts)).await;
    }

    async fn invalidate(&self, user_id: i64) {
        self.entries.invalidate(&user_id).await;
    }
}
