use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 帖子数据库实体，创建后归属不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub owner_id: i64,
}
