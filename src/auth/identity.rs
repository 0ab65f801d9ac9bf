use crate::auth::TokenService;
use crate::database::{Repository, User};
use crate::error::AppError;

/// 根据令牌解析当前用户
///
/// 令牌过期、令牌无效以及令牌主体对应的用户不存在，都返回 `AppError::Unauthenticated`，
/// 调用方无法据此判断邮箱是否存在。结果不做缓存。
pub async fn resolve(
    tokens: &TokenService,
    repo: &dyn Repository,
    token: &str,
) -> Result<User, AppError> {
    let claims = tokens.validate(token).map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::from(e)
    })?;

    match repo.find_user_by_email(&claims.sub).await? {
        Some(user) => Ok(user),
        None => {
            tracing::debug!("Token subject has no matching user");
            Err(AppError::Unauthenticated)
        }
    }
}
