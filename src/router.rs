use axum::{
    Router,
    routing::{delete, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

// 公开路由：注册和登录
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(routes::user::signup))
        .route("/login", post(routes::user::login))
}

// 需要认证的帖子路由
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/addpost", post(routes::post::add_post))
        .route("/getposts", post(routes::post::get_posts))
        .route("/deletepost/{post_id}", delete(routes::post::remove_post))
        .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

/// 创建主路由，所有接口挂在 `api_base_uri` 之下
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()));

    let router = if state.config.api_base_uri.is_empty() || state.config.api_base_uri == "/" {
        api
    } else {
        Router::new().nest(&state.config.api_base_uri, api)
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
