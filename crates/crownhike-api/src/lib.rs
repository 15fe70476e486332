//! CrownHike HTTP 服务
//!
//! 提供账号、山峰目录、登顶、徒步记录、紧急信息卡与徽章的 REST API。
//!
//! ## 模块结构
//!
//! - `auth`: JWT 与密码哈希
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型与统一错误响应
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证与安全头中间件
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use routes::api_routes;
pub use state::AppState;
