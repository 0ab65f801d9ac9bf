use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{AppState, auth::resolve, error::AppError};

/// 从 `Authorization: Bearer` 头解析当前用户，写入请求扩展供处理函数使用
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(authorization) = req.headers().typed_get::<Authorization<Bearer>>() else {
        tracing::debug!("Missing or malformed Authorization header");
        return Err(AppError::Unauthenticated);
    };

    let user = resolve(&state.tokens, state.repo.as_ref(), authorization.token()).await?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
