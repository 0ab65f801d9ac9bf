use crate::{
    AppState,
    database::{Post, User},
    error::AppError,
};

/// 帖子的创建、列表和删除，只允许作者本人操作
pub struct PostOperation;

impl PostOperation {
    /// 按 UTF-8 字节数限制帖子大小
    pub async fn create_post(state: &AppState, user: &User, text: &str) -> Result<Post, AppError> {
        let max = state.config.max_post_size;
        if text.len() > max {
            tracing::debug!(
                "Rejected post of {} bytes from user {}",
                text.len(),
                user.id
            );
            return Err(AppError::PayloadTooLarge { max });
        }

        let post = state.repo.insert_post(text, user.id).await?;
        state.posts_cache.invalidate(user.id).await;

        tracing::info!("User {} created post {}", user.id, post.id);
        Ok(post)
    }

    /// 优先返回缓存快照，未命中时查询数据库并写入缓存
    pub async fn list_posts(state: &AppState, user: &User) -> Result<Vec<Post>, AppError> {
        if let Some(posts) = state.posts_cache.get(user.id).await {
            tracing::debug!("Post cache hit for user {}", user.id);
            return Ok(posts);
        }

        let posts = state.repo.find_posts_by_owner(user.id).await?;
        state.posts_cache.put(user.id, posts.clone()).await;

        tracing::debug!("Post cache miss for user {}, loaded {}", user.id, posts.len());
        Ok(posts)
    }

    /// 帖子不存在和属于他人都返回 `NotFound`
    pub async fn delete_post(state: &AppState, user: &User, post_id: i64) -> Result<(), AppError> {
        let Some(post) = state
            .repo
            .find_post_by_id_and_owner(post_id, user.id)
            .await?
        else {
            return Err(AppError::NotFound);
        };

        state.repo.delete_post(post.id).await?;
        state.posts_cache.invalidate(user.id).await;

        tracing::info!("User {} deleted post {}", user.id, post.id);
        Ok(())
    }
}
