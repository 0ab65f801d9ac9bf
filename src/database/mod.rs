// 数据库模块
// 包含数据库实体定义和存储库实现

use async_trait::async_trait;

pub mod models; // 数据库实体定义
pub mod repositories; // 存储库实现

// 重新导出常用类型，方便其他模块使用
pub use models::{Post, User};
pub use repositories::{MemoryRepository, PgRepository};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 唯一约束冲突，例如邮箱已被注册
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 持久化接口，所有方法要么返回完整结果要么失败
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// 邮箱已存在时返回 `RepositoryError::Conflict`
    async fn insert_user(&self, email: &str, password_hash: &str) -> RepositoryResult<User>;

    async fn find_posts_by_owner(&self, owner_id: i64) -> RepositoryResult<Vec<Post>>;

    async fn insert_post(&self, text: &str, owner_id: i64) -> RepositoryResult<Post>;

    async fn find_post_by_id_and_owner(
        &self,
        post_id: i64,
        owner_id: i64,
    ) -> RepositoryResult<Option<Post>>;

    async fn delete_post(&self, post_id: i64) -> RepositoryResult<()>;
}
