//! 登顶处理器

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crownhike_core::{ClimbedPeak, MarkPeak};

use crate::dto::{ListResponse, MarkPeakRequest, MarkPeakResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 标记山峰为已登顶，返回本次获得的徽章
///
/// POST /peaks/{id}/mark
///
/// 请求体可省略；重复登顶返回 400
pub async fn mark_peak(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Option<Json<MarkPeakRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<MarkPeakResponse>)> {
    let Path(peak_id) = id?;
    let mark = payload?
        .map(|Json(req)| MarkPeak::from(req))
        .unwrap_or_default();

    let outcome = state
        .ascent_service
        .mark_peak(user.id, peak_id, mark)
        .await?;

    Ok((StatusCode::CREATED, Json(MarkPeakResponse::from(outcome))))
}

/// 当前用户已登顶的山峰
///
/// GET /me/peaks
pub async fn list_climbed_peaks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<ClimbedPeak>>> {
    let peaks = state.ascent_service.list_climbed_peaks(user.id).await?;
    Ok(Json(ListResponse::new(peaks)))
}
