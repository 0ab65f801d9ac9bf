use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::{Post, Repository, RepositoryError, RepositoryResult, User};

/// 内存存储库，未配置数据库时使用，也用于测试
#[derive(Default)]
pub struct MemoryRepository {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    next_user_id: i64,
    next_post_id: i64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> RepositoryResult<User> {
        let mut tables = self.inner.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(RepositoryError::Conflict);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_posts_by_owner(&self, owner_id: i64) -> RepositoryResult<Vec<Post>> {
        let tables = self.inner.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_post(&self, text: &str, owner_id: i64) -> RepositoryResult<Post> {
        let mut tables = self.inner.write().await;
        tables.next_post_id += 1;
        let post = Post {
            id: tables.next_post_id,
            text: text.to_string(),
            owner_id,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post_by_id_and_owner(
        &self,
        post_id: i64,
        owner_id: i64,
    ) -> RepositoryResult<Option<Post>> {
        let tables = self.inner.read().await;
        Ok(tables
            .posts
            .get(&post_id)
            .filter(|p| p.owner_id == owner_id)
            .cloned())
    }

    async fn delete_post(&self, post_id: i64) -> RepositoryResult<()> {
        self.inner.write().await.posts.remove(&post_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = MemoryRepository::new();
        let user = repo.insert_user("a@x.com", "hash").await.unwrap();
        assert_eq!(user.id, 1);

        let err = repo.insert_user("a@x.com", "other").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict));
    }

    #[tokio::test]
    async fn posts_are_scoped_to_owner() {
        let repo = MemoryRepository::new();
        let post = repo.insert_post("hello", 1).await.unwrap();
        repo.insert_post("other", 2).await.unwrap();

        let mine = repo.find_posts_by_owner(1).await.unwrap();
        assert_eq!(mine, vec![post.clone()]);
        assert!(repo.find_post_by_id_and_owner(post.id, 2).await.unwrap().is_none());

        repo.delete_post(post.id).await.unwrap();
        assert!(repo.find_posts_by_owner(1).await.unwrap().is_empty());
    }
}
