//! OpenRouteService 路线规划实现
//!
//! 使用 foot-hiking profile 的 GeoJSON 接口。起点搜索半径不限（-1），
//! 终点（山峰）在 5000 米范围内寻找可通行道路。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crownhike_shared::config::RoutePlannerConfig;
use crownhike_shared::observability::metrics;

use super::{GeoPoint, PlannedRoute, RoutePlanner};
use crate::error::{CoreError, Result};

const DIRECTIONS_PATH: &str = "/v2/directions/foot-hiking/geojson";

/// 起点不限半径，终点 5000 米
const SEARCH_RADIUSES: [i32; 2] = [-1, 5000];

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON 坐标顺序为 [lng, lat, (ele)]
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    summary: Summary,
}

#[derive(Debug, Default, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

/// OpenRouteService 客户端
pub struct OpenRouteServicePlanner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenRouteServicePlanner {
    pub fn new(config: &RoutePlannerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CoreError::Internal(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(from: GeoPoint, to: GeoPoint) -> serde_json::Value {
        json!({
            "coordinates": [[from.lng, from.lat], [to.lng, to.lat]],
            "radiuses": SEARCH_RADIUSES,
        })
    }
}

/// 从 GeoJSON 响应中取第一条路线
fn parse_directions(response: DirectionsResponse) -> Result<PlannedRoute> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(CoreError::RouteNotFound)?;

    let path = feature
        .geometry
        .coordinates
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| GeoPoint::new(c[1], c[0]))
        .collect();

    Ok(PlannedRoute {
        path,
        distance_m: feature.properties.summary.distance,
        duration_s: feature.properties.summary.duration,
    })
}

#[async_trait]
impl RoutePlanner for OpenRouteServicePlanner {
    async fn plan(&self, from: GeoPoint, to: GeoPoint) -> Result<PlannedRoute> {
        let Some(api_key) = self.api_key.as_deref() else {
            metrics::record_route_planner_request("unavailable");
            return Err(CoreError::RoutePlannerUnavailable);
        };

        debug!(?from, ?to, "Requesting foot-hiking route");

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, DIRECTIONS_PATH))
            .header(reqwest::header::AUTHORIZATION, api_key)
            .json(&Self::request_body(from, to))
            .send()
            .await
            .map_err(|e| {
                metrics::record_route_planner_request("error");
                CoreError::RoutePlanner(format!("请求路线服务失败: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Route planner returned error status");
            metrics::record_route_planner_request("error");
            return Err(CoreError::RoutePlanner(format!("路线服务返回 HTTP {status}")));
        }

        let parsed: DirectionsResponse = resp.json().await.map_err(|e| {
            metrics::record_route_planner_request("error");
            CoreError::RoutePlanner(format!("解析路线服务响应失败: {e}"))
        })?;

        let route = parse_directions(parsed);
        metrics::record_route_planner_request(if route.is_ok() { "ok" } else { "not_found" });
        route
    }
}
