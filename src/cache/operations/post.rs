use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::PostCache;
use crate::cache::keys::post_keys::{POSTS_LRU_KEY, user_posts_key};
use crate::database::Post;

/// 基于 Redis 的帖子缓存
///
/// 快照用 `SET EX` 保存，过期交给 Redis；最近访问时间记录在有序集合中，
/// 写入后超出容量的最旧用户会被删除。
pub struct RedisPostCache {
    redis: Arc<RedisClient>,
    capacity: u64,
    ttl: Duration,
}

impl RedisPostCache {
    pub fn new(redis: Arc<RedisClient>, capacity: u64, ttl: Duration) -> Self {
        Self {
            redis,
            capacity,
            ttl,
        }
    }

    async fn try_get(&self, user_id: i64) -> Result<Option<Vec<Post>>, redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let key = user_posts_key(user_id);
        let result: Option<String> = conn.get(key).await?;

        match result {
            Some(json) => {
                let posts = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                let _: () = conn.zadd(POSTS_LRU_KEY, user_id, now_millis()).await?;
                Ok(Some(posts))
            }
            None => {
                let _: () = conn.zrem(POSTS_LRU_KEY, user_id).await?;
                Ok(None)
            }
        }
    }

    async fn try_put(&self, user_id: i64, posts: &[Post]) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(posts).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::IoError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let _: () = redis::pipe()
            .atomic()
            .set_ex(user_posts_key(user_id), json, self.ttl.as_secs().max(1))
            .ignore()
            .zadd(POSTS_LRU_KEY, user_id, now_millis())
            .ignore()
            .query_async(&mut conn)
            .await?;

        // 最近访问早于一个 TTL 的成员，其快照已被 Redis 过期删除
        let stale: u64 = conn
            .zrembyscore(POSTS_LRU_KEY, "-inf", stale_cutoff(now_millis(), self.ttl))
            .await?;
        if stale > 0 {
            tracing::debug!("Dropped {} expired entries from the LRU index", stale);
        }

        let count: u64 = conn.zcard(POSTS_LRU_KEY).await?;
        if let Some(excess) = overflow(count, self.capacity) {
            let evicted: Vec<(i64, f64)> = conn.zpopmin(POSTS_LRU_KEY, excess).await?;
            let keys: Vec<String> = evicted.iter().map(|(id, _)| user_posts_key(*id)).collect();
            if !keys.is_empty() {
                tracing::debug!("Evicting {} cached post lists", keys.len());
                let _: () = conn.del(keys).await?;
            }
        }

        Ok(())
    }

    async fn try_invalidate(&self, user_id: i64) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let _: () = redis::pipe()
            .atomic()
            .del(user_posts_key(user_id))
            .ignore()
            .zrem(POSTS_LRU_KEY, user_id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PostCache for RedisPostCache {
    async fn get(&self, user_id: i64) -> Option<Vec<Post>> {
        match self.try_get(user_id).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Failed to read cached posts: {}", e);
                None
            }
        }
    }

    async fn put(&self, user_id: i64, posts: Vec<Post>) {
        if let Err(e) = self.try_put(user_id, &posts).await {
            tracing::warn!("Failed to cache posts: {}", e);
        }
    }

    async fn invalidate(&self, user_id: i64) {
        if let Err(e) = self.try_invalidate(user_id).await {
            tracing::warn!("Failed to invalidate cached posts: {}", e);
        }
    }
}

fn now_millis() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

/// 分数严格小于该值的成员已过期；与 `SET EX` 一样，TTL 不足一秒按一秒计
fn stale_cutoff(now_ms: f64, ttl: Duration) -> f64 {
    let ttl_ms = ttl.as_secs().max(1) as f64 * 1000.0;
    // 上界为闭区间，恰好一个 TTL 前访问的成员保留
    now_ms - ttl_ms - 1.0
}

/// 超出容量的条目数
fn overflow(count: u64, capacity: u64) -> Option<isize> {
    count
        .checked_sub(capacity)
        .filter(|n| *n > 0)
        .map(|n| n as isize)
}
