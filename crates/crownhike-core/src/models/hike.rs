//! 徒步记录与轨迹实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 客户端提交的原始轨迹点
///
/// 经纬度可能缺失或不是有限数值，入库前需经过 [`sanitize_track`] 过滤
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub lat: f64,
    pub lng: f64,
}

/// 轨迹点（seq 为该点在提交轨迹中的原始下标）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrackPoint {
    pub seq: i32,
    pub lat: f64,
    pub lng: f64,
}

/// 新徒步记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewHike {
    pub peak_id: i64,
    pub started_at: DateTime<Utc>,
    pub duration_sec: i32,
    pub track_distance_km: f64,
    pub straight_distance_km: Option<f64>,
}

/// 徒步记录摘要（与山峰信息联表）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HikeSummary {
    pub id: i64,
    pub peak_id: i64,
    pub peak_name: String,
    pub peak_height_m: i32,
    pub peak_range: String,
    pub started_at: DateTime<Utc>,
    pub duration_sec: i32,
    pub track_distance_km: f64,
    pub straight_distance_km: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// 徒步记录详情（摘要 + 按 seq 排序的轨迹）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HikeDetail {
    pub user_id: i64,
    #[serde(flatten)]
    pub summary: HikeSummary,
    pub track: Vec<TrackPoint>,
}

/// 过滤轨迹：只保留经纬度均为有限数值的点，seq 取其在原始轨迹中的下标
///
/// 不校验经纬度范围，越界但有限的点照常保留
pub fn sanitize_track(raw: &[RawPoint]) -> Vec<TrackPoint> {
    raw.iter()
        .enumerate()
        .filter(|(_, p)| p.lat.is_finite() && p.lng.is_finite())
        .map(|(index, p)| TrackPoint {
            seq: index as i32,
            lat: p.lat,
            lng: p.lng,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_submitted_index() {
        let raw = vec![
            RawPoint { lat: 49.1, lng: 20.0 },
            RawPoint { lat: f64::NAN, lng: 20.1 },
            RawPoint { lat: 49.3, lng: 20.2 },
        ];
        let track = sanitize_track(&raw);
        assert_eq!(track.len(), 2);
        assert_eq!(track[0].seq, 0);
        assert_eq!(track[1].seq, 2);
        assert_eq!(track[1].lat, 49.3);
    }

    #[test]
    fn test_sanitize_keeps_out_of_range_finite_point() {
        let raw = vec![
            RawPoint { lat: 49.2, lng: 19.9 },
            RawPoint { lat: f64::NAN, lng: 19.9 },
            RawPoint { lat: 95.0, lng: 19.9 },
        ];
        let track = sanitize_track(&raw);
        assert_eq!(track.iter().map(|p| p.seq).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(track[1].lat, 95.0);
    }

    #[test]
    fn test_sanitize_drops_infinite() {
        let raw = vec![
            RawPoint { lat: f64::INFINITY, lng: 20.0 },
            RawPoint { lat: 49.0, lng: f64::NEG_INFINITY },
        ];
        assert!(sanitize_track(&raw).is_empty());
    }
}
