use axum::{Json, extract::State};

use crate::{
    AppState,
    error::AppError,
    operations::UserOperation,
    routes::extract::AppJson,
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{LoginResponse, UserLogin, UserWithToken};

/// 注册新用户
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<UserLogin>,
) -> Result<Json<ApiResponse<UserWithToken>>, AppError> {
    if let Some(reason) = req.validate() {
        return Err(AppError::Validation(reason.to_string()));
    }

    let (user, access_token) = UserOperation::register(&state, &req.email, &req.password).await?;

    Ok(success_to_api_response(UserWithToken {
        access_token,
        user: user.into(),
    }))
}

/// 登录并获取访问令牌
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<UserLogin>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let access_token = UserOperation::login(&state, &req.email, &req.password).await?;

    Ok(success_to_api_response(LoginResponse { access_token }))
}
