//! 徒步记录处理器

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crownhike_core::{HikeDetail, HikeSummary};

use crate::dto::{CreateHikeRequest, CreatedId, DataResponse, ListResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 当前用户的徒步记录
///
/// GET /hikes
pub async fn list_hikes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<HikeSummary>>> {
    let hikes = state.hike_service.list_hikes(user.id).await?;
    Ok(Json(ListResponse::new(hikes)))
}

/// 徒步记录详情（含轨迹）
///
/// GET /hikes/{id}
pub async fn get_hike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<HikeDetail>>> {
    let Path(hike_id) = id?;
    let hike = state.hike_service.get_hike(user.id, hike_id).await?;
    Ok(Json(DataResponse::new(hike)))
}

/// 保存徒步记录
///
/// POST /hikes
pub async fn create_hike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateHikeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<CreatedId>>)> {
    let Json(req) = payload?;
    let (hike, track) = req.into_parts();

    let id = state.hike_service.record_hike(user.id, hike, &track).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedId { id })),
    ))
}
