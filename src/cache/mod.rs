// 缓存模块
// 按用户缓存帖子列表，缓存不是权威数据，数据库始终是准确来源

use async_trait::async_trait;

use crate::database::Post;

pub mod keys;
pub mod memory;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use memory::MemoryPostCache;
pub use operations::post::RedisPostCache;

/// 用户帖子缓存
///
/// 容量和过期时间都必须生效。缓存故障不会导致请求失败，只会退化为未命中。
#[async_trait]
pub trait PostCache: Send + Sync {
    /// 未命中或已过期时返回 None
    async fn get(&self, user_id: i64) -> Option<Vec<Post>>;

    /// 覆盖该用户的快照并重新计算过期时间
    async fn put(&self, user_id: i64, posts: Vec<Post>);

    async fn invalidate(&self, user_id: i64);
}
