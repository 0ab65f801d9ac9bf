use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// 请求体解析失败时返回统一的 `ApiResponse` 信封，而不是 axum 默认的纯文本
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 路径参数解析失败时同样走 `AppError::Validation`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
