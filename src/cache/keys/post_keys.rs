/// 用户帖子缓存键前缀
const USER_POSTS_PREFIX: &str = "posts:user:";

/// 按最近访问时间排序的用户集合，用于容量淘汰
pub const POSTS_LRU_KEY: &str = "posts:lru";

/// 生成用户帖子缓存键
pub fn user_posts_key(user_id: i64) -> String {
    format!("{}{}", USER_POSTS_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_user() {
        assert_eq!(user_posts_key(42), "posts:user:42");
        assert_ne!(user_posts_key(1), user_posts_key(11));
        assert!(!POSTS_LRU_KEY.starts_with(USER_POSTS_PREFIX));
    }
}
