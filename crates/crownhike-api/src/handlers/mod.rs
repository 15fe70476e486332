//! HTTP 请求处理器

pub mod ascents;
pub mod badges;
pub mod emergency;
pub mod health;
pub mod hikes;
pub mod peaks;
pub mod users;

use crate::error::ApiError;

/// 未匹配任何路由
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
