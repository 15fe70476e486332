//! 徽章处理器

use axum::{Extension, Json, extract::State};

use crownhike_core::Badge;

use crate::dto::{AwardResponse, DataResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 徽章目录（公开）
///
/// GET /api/badges
pub async fn list_badges(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<Badge>>>> {
    let badges = state.badge_repo.list_badges().await?;
    Ok(Json(DataResponse::new(badges)))
}

/// 当前用户已获得的徽章
///
/// GET /api/badges/user
pub async fn list_user_badges(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<Vec<Badge>>>> {
    let badges = state.badge_repo.list_user_badges(user.id).await?;
    Ok(Json(DataResponse::new(badges)))
}

/// 重新判定数量阈值徽章，返回本次新获得的徽章
///
/// POST /api/badges/award-test
pub async fn award_test(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AwardResponse>> {
    let awarded = state.badge_engine.award_threshold_badges(user.id).await?;
    Ok(Json(AwardResponse { ok: true, awarded }))
}
