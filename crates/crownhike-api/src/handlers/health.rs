//! 健康检查处理器

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::error;

use crownhike_shared::database::Database;

use crate::dto::{HealthResponse, IdentityDto, ProfileCheckResponse};
use crate::error::{ApiError, Result};
use crate::middleware::AuthUser;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "crownhike-api";

/// 存活探针
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        time: Utc::now(),
    })
}

/// 数据库连通性检查
///
/// GET /db-health
pub async fn db_health(State(state): State<AppState>) -> Result<Json<Value>> {
    let ok = Database::from_pool(state.pool.clone())
        .health_check()
        .await
        .map_err(|e| {
            error!(error = %e, "Database health check failed");
            ApiError::DatabaseUnavailable
        })?;

    Ok(Json(json!({ "ok": true, "db": [{ "ok": ok }] })))
}

/// 验证 Token 是否可用
///
/// GET /profile
pub async fn profile(Extension(user): Extension<AuthUser>) -> Json<ProfileCheckResponse> {
    Json(ProfileCheckResponse {
        ok: true,
        message: "Access granted",
        user: IdentityDto {
            id: user.id,
            email: user.email,
        },
    })
}
