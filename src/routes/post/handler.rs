use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{
    AppState,
    database::{Post, User},
    error::AppError,
    operations::PostOperation,
    routes::extract::{AppJson, AppPath},
    utils::{ApiResponse, success_to_api_response},
};

use super::model::{CreatePostRequest, DeletePostResponse};

// 以下处理函数都挂在认证中间件之后，User 由中间件写入

#[axum::debug_handler]
pub async fn add_post(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = PostOperation::create_post(&state, &user, &req.text).await?;
    Ok(success_to_api_response(post))
}

#[axum::debug_handler]
pub async fn get_posts(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Post>>>, AppError> {
    let posts = PostOperation::list_posts(&state, &user).await?;
    Ok(success_to_api_response(posts))
}

#[axum::debug_handler]
pub async fn remove_post(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    AppPath(post_id): AppPath<i64>,
) -> Result<Json<ApiResponse<DeletePostResponse>>, AppError> {
    PostOperation::delete_post(&state, &user, post_id).await?;
    Ok(success_to_api_response(DeletePostResponse {
        detail: "Post deleted".to_string(),
    }))
}
