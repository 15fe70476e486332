//! 紧急信息卡处理器

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use crownhike_core::EmergencyCard;

use crate::dto::{DataResponse, OkResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/emergency/me
pub async fn get_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<EmergencyCard>>> {
    let card = state.emergency_service.get_card(user.id).await?;
    Ok(Json(DataResponse::new(card)))
}

/// 整体覆盖保存信息卡，并判定安全类徽章
///
/// PUT /api/emergency/me
pub async fn save_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<EmergencyCard>, JsonRejection>,
) -> Result<Json<OkResponse>> {
    let Json(card) = payload?;

    let awarded = state.emergency_service.save_card(user.id, card).await?;
    if !awarded.is_empty() {
        info!(user_id = user.id, ?awarded, "Emergency card badges awarded");
    }

    Ok(Json(OkResponse::new()))
}
