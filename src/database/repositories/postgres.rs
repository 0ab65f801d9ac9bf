use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{Post, Repository, RepositoryError, RepositoryResult, User};

/// PostgreSQL 存储库实现
///
/// 每条语句从连接池借出连接，语句结束（包括出错）时连接随 drop 归还。
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 执行 migrations 目录下的建表脚本
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> RepositoryResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                tracing::debug!("Inserted user {}", user.id);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::Conflict)
            }
            Err(e) => {
                tracing::error!("Failed to insert user: {:?}", e);
                Err(e.into())
            }
        }
    }

    async fn find_posts_by_owner(&self, owner_id: i64) -> RepositoryResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, text, owner_id
            FROM posts
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn insert_post(&self, text: &str, owner_id: i64) -> RepositoryResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (text, owner_id)
            VALUES ($1, $2)
            RETURNING id, text, owner_id
            "#,
        )
        .bind(text)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_post_by_id_and_owner(
        &self,
        post_id: i64,
        owner_id: i64,
    ) -> RepositoryResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, text, owner_id
            FROM posts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete_post(&self, post_id: i64) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
