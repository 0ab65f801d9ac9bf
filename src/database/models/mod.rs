// 数据库实体定义

pub mod post;
pub mod user;

pub use post::Post;
pub use user::User;
