/// 缓存键模块
/// 提供各种缓存键生成函数

// 帖子缓存键模块
pub mod post_keys;

pub use post_keys::{POSTS_LRU_KEY, user_posts_key};
