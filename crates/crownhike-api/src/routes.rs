//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{handlers, middleware::require_auth, state::AppState};

/// 公开路由（无需认证）
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/db-health", get(handlers::health::db_health))
        .route("/users/register", post(handlers::users::register))
        .route("/users/login", post(handlers::users::login))
        .route("/peaks", get(handlers::peaks::list_peaks))
        .route("/peaks/{id}", get(handlers::peaks::get_peak))
        .route("/peaks/{id}/route", get(handlers::peaks::plan_route))
        .route("/api/badges", get(handlers::badges::list_badges))
}

/// 需要登录的路由
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::health::profile))
        // 账号
        .route(
            "/users/me",
            get(handlers::users::get_me)
                .put(handlers::users::update_me)
                .delete(handlers::users::delete_me),
        )
        .route("/users/password", put(handlers::users::change_password))
        // 登顶
        .route("/peaks/{id}/mark", post(handlers::ascents::mark_peak))
        .route("/me/peaks", get(handlers::ascents::list_climbed_peaks))
        // 徒步记录
        .route(
            "/hikes",
            get(handlers::hikes::list_hikes).post(handlers::hikes::create_hike),
        )
        .route("/hikes/{id}", get(handlers::hikes::get_hike))
        // 紧急信息卡
        .route(
            "/api/emergency/me",
            get(handlers::emergency::get_card).put(handlers::emergency::save_card),
        )
        // 徽章
        .route("/api/badges/user", get(handlers::badges::list_user_badges))
        .route("/api/badges/award-test", post(handlers::badges::award_test))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// 构建完整路由
///
/// 只包含业务路由与认证；CORS、超时、追踪等外层中间件由 main 添加
pub fn api_routes(state: AppState) -> Router {
    public_routes()
        .merge(protected_routes(state.clone()))
        .fallback(handlers::not_found)
        .with_state(state)
}
