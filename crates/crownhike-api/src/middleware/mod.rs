//! 中间件模块
//!
//! 提供认证与 HTTP 安全头中间件

mod auth;
mod security;

pub use auth::{AuthUser, require_auth};
pub use security::security_headers;
