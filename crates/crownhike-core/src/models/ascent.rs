//! 登顶记录实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::badge::Badge;

/// 登顶请求附带的可选数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkPeak {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo_url: Option<String>,
}

/// 已登顶山峰（登顶记录与山峰信息联表）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClimbedPeak {
    pub id: i64,
    pub peak_id: i64,
    pub marked_at: DateTime<Utc>,
    pub name: String,
    pub height_m: i32,
    pub mountain_range: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo_url: Option<String>,
}

/// 登顶结果：山峰名称与本次新获得的徽章
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPeakOutcome {
    pub peak_name: String,
    /// 数量阈值徽章（完整徽章信息）
    pub awarded_badges: Vec<Badge>,
    /// 特殊徽章（仅编码）
    pub awarded_special_badges: Vec<String>,
}
