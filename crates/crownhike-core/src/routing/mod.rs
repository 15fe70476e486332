//! 步行路线规划
//!
//! 通过外部路线服务计算从用户位置到山峰的徒步路线。
//! 服务层只依赖 [`RoutePlanner`]，默认实现为 OpenRouteService。

mod ors;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use ors::OpenRouteServicePlanner;

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// 规划结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRoute {
    pub path: Vec<GeoPoint>,
    /// 距离（米）
    pub distance_m: f64,
    /// 预计耗时（秒）
    pub duration_s: f64,
}

/// 路线规划接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutePlanner: Send + Sync {
    /// 规划步行路线
    ///
    /// - 未配置服务凭据：`CoreError::RoutePlannerUnavailable`
    /// - 服务未返回路线：`CoreError::RouteNotFound`
    async fn plan(&self, from: GeoPoint, to: GeoPoint) -> Result<PlannedRoute>;
}
