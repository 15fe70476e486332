//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将用户信息注入请求扩展。
//! 缺少或格式错误的 Authorization 头返回 401，Token 无效或过期返回 403，
//! 两种情况都不会进入处理器。

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::error::ApiError;
use crate::state::AppState;

/// 已认证用户，由中间件注入请求扩展
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// 认证中间件，挂在需要登录的路由上
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        return ApiError::Unauthorized("Missing or invalid token".to_string()).into_response();
    };

    match state.jwt_manager.verify_token(bearer.token()) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser {
                id: claims.sub,
                email: claims.email,
            });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
