use serde::{Deserialize, Serialize};

// 创建帖子请求
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

// 删除帖子响应
#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub detail: String,
}
