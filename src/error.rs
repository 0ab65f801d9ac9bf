use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::auth::TokenError;
use crate::database::RepositoryError;
use crate::utils::{error_codes, error_to_api_response};

/// 对外暴露的错误类型，每种错误对应一个稳定的状态码和错误码
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("email already registered")]
    EmailTaken,
    /// 不区分邮箱不存在和密码错误
    #[error("incorrect email or password")]
    BadCredentials,
    /// 令牌过期、令牌无效、用户不存在统一归为此类
    #[error("could not validate credentials")]
    Unauthenticated,
    #[error("post exceeds the maximum size of {max} bytes")]
    PayloadTooLarge { max: usize },
    #[error("post not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    /// 基础设施故障，细节只写日志
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::Unauthenticated
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmailTaken | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            AppError::EmailTaken => error_codes::EMAIL_TAKEN,
            AppError::BadCredentials => error_codes::BAD_CREDENTIALS,
            AppError::Unauthenticated => error_codes::UNAUTHENTICATED,
            AppError::PayloadTooLarge { .. } => error_codes::PAYLOAD_TOO_LARGE,
            AppError::NotFound => error_codes::NOT_FOUND,
            AppError::Validation(_) => error_codes::VALIDATION_ERROR,
            AppError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let error_message = match &self {
            AppError::EmailTaken => "邮箱已被注册".to_string(),
            AppError::BadCredentials => "邮箱或密码错误".to_string(),
            AppError::Unauthenticated => "无法验证身份凭证".to_string(),
            AppError::PayloadTooLarge { max } => format!("帖子大小超过上限 {} 字节", max),
            AppError::NotFound => "帖子不存在".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "内部服务器错误".to_string()
            }
        };

        let mut response =
            (status, error_to_api_response::<()>(code, error_message)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_collapse_to_unauthenticated() {
        assert!(matches!(
            AppError::from(TokenError::Expired),
            AppError::Unauthenticated
        ));
        assert!(matches!(
            AppError::from(TokenError::Invalid),
            AppError::Unauthenticated
        ));
    }

    #[test]
    fn error_kinds_map_to_distinct_statuses() {
        let response = AppError::PayloadTooLarge { max: 10 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::EmailTaken.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::from(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), error_codes::INTERNAL_ERROR);
    }

    #[test]
    fn error_codes_are_distinct() {
        let errors = [
            AppError::EmailTaken,
            AppError::BadCredentials,
            AppError::Unauthenticated,
            AppError::PayloadTooLarge { max: 1 },
            AppError::NotFound,
            AppError::Validation(String::new()),
            AppError::Internal(String::new()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(AppError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert_eq!(error_codes::PAYLOAD_TOO_LARGE, error_codes::NOT_FOUND + 1);
    }
}
