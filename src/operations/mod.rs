// 业务操作
// 与传输层无关，HTTP 处理函数只负责解析请求和包装响应

pub mod post;
pub mod user;

pub use post::PostOperation;
pub use user::UserOperation;
