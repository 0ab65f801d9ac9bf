// 认证模块
// 密码哈希、令牌签发校验以及根据令牌解析当前用户

pub mod identity;
pub mod password;
pub mod token;

pub use identity::resolve;
pub use password::CredentialStore;
pub use token::{Claims, TokenError, TokenService};
