/// 缓存操作
/// 提供基于 Redis 的缓存实现

// 帖子缓存操作
pub mod post;

pub use post::RedisPostCache;
