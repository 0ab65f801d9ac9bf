use crate::{
    AppState,
    database::{RepositoryError, User},
    error::AppError,
};

/// 用户注册与登录
pub struct UserOperation;

impl UserOperation {
    /// 注册新用户并签发令牌
    pub async fn register(
        state: &AppState,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        if state.repo.find_user_by_email(email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        // bcrypt 计算较慢，放到阻塞线程池
        let credentials = state.credentials.clone();
        let plain = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || credentials.hash(&plain))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        // 并发注册同一邮箱时由唯一约束兜底
        let user = match state.repo.insert_user(email, &password_hash).await {
            Ok(user) => user,
            Err(RepositoryError::Conflict) => return Err(AppError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        let (token, _) = state
            .tokens
            .issue(&user.email, None)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))?;

        tracing::info!("Registered user {}", user.id);
        Ok((user, token))
    }

    /// 校验邮箱和密码，成功后签发令牌
    pub async fn login(state: &AppState, email: &str, password: &str) -> Result<String, AppError> {
        let user = state.repo.find_user_by_email(email).await?;

        // 邮箱不存在时也做一次同等代价的校验，避免通过耗时判断邮箱是否注册
        let credentials = state.credentials.clone();
        let plain = password.to_owned();
        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || match stored {
            Some(stored) => credentials.verify(&plain, &stored),
            None => credentials.verify_unknown(&plain),
        })
        .await
        .map_err(|e| AppError::Internal(format!("verify task failed: {}", e)))?;

        let user = match user {
            Some(user) if verified => user,
            Some(user) => {
                tracing::debug!("Login rejected for user {}", user.id);
                return Err(AppError::BadCredentials);
            }
            None => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AppError::BadCredentials);
            }
        };

        let (token, _) = state
            .tokens
            .issue(&user.email, None)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))?;

        tracing::info!("User {} logged in", user.id);
        Ok(token)
    }
}
