//! 山峰目录处理器（公开）

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};

use crownhike_core::{GeoPoint, Peak, PeakQuery, PlannedRoute};

use crate::dto::{DataResponse, PeakListParams, PeakPageResponse, RouteParams};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 山峰列表
///
/// GET /peaks?page&limit&difficulty&main_trail_color&mountain_range&search&sort&dir
pub async fn list_peaks(
    State(state): State<AppState>,
    params: std::result::Result<Query<PeakListParams>, QueryRejection>,
) -> Result<Json<PeakPageResponse>> {
    let Query(params) = params?;
    let (query, peaks) = state
        .peak_service
        .list_peaks(PeakQuery::from(params))
        .await?;

    Ok(Json(PeakPageResponse::new(&query, peaks)))
}

/// 山峰详情
///
/// GET /peaks/{id}
pub async fn get_peak(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<Peak>>> {
    let Path(id) = id?;
    let peak = state.peak_service.get_peak(id).await?;
    Ok(Json(DataResponse::new(peak)))
}

/// 从用户当前位置到山峰的徒步路线
///
/// GET /peaks/{id}/route?lat&lng
pub async fn plan_route(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    params: std::result::Result<Query<RouteParams>, QueryRejection>,
) -> Result<Json<DataResponse<PlannedRoute>>> {
    let Path(id) = id?;
    let Query(params) = params?;

    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(ApiError::Validation(
            "lat and lng query parameters are required".to_string(),
        ));
    };

    let route = state
        .peak_service
        .plan_route(id, GeoPoint::new(lat, lng))
        .await?;
    Ok(Json(DataResponse::new(route)))
}
