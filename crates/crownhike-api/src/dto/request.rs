//! 请求 DTO 定义
//!
//! 请求体字段命名沿用客户端约定：账号与徒步记录为 camelCase，
//! 资料、登顶与紧急信息卡为 snake_case

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use validator::Validate;

use crownhike_core::{
    Difficulty, MarkPeak, NewHike, PeakQuery, PeakSort, ProfileUpdate, RawPoint, SortDirection,
    TrailColor,
};

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Missing fields"))]
    pub username: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Missing fields"))]
    pub password: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Missing credentials"))]
    pub email: String,
    #[validate(length(min = 1, message = "Missing credentials"))]
    pub password: String,
}

/// 资料更新请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub allow_location_sharing: Option<bool>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            username: req.username,
            allow_location_sharing: req.allow_location_sharing,
        }
        .normalized()
    }
}

/// 修改密码请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Missing fields"))]
    pub old_password: String,
    #[validate(length(min = 6, message = "New password too short"))]
    pub new_password: String,
}

/// 登顶请求（请求体可省略）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkPeakRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo_url: Option<String>,
}

impl From<MarkPeakRequest> for MarkPeak {
    fn from(req: MarkPeakRequest) -> Self {
        MarkPeak {
            lat: req.lat,
            lng: req.lng,
            photo_url: req.photo_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// 轨迹点
///
/// 坐标接受数字或数字字符串，其余取值视为无效点，在入库前被丢弃
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrackPointRequest {
    pub lat: Value,
    pub lng: Value,
}

fn coordinate(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

impl From<&TrackPointRequest> for RawPoint {
    fn from(point: &TrackPointRequest) -> Self {
        RawPoint {
            lat: coordinate(&point.lat),
            lng: coordinate(&point.lng),
        }
    }
}

/// f64 可精确表示的最大整数
const MAX_EXACT_ID: f64 = 9_007_199_254_740_991.0;

/// 整数或整数值的数字字符串，如 `7`、`7.0`、`"7"`
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(id) = value.as_i64() {
        return Ok(id);
    }
    let n = coordinate(&value);
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_ID {
        Ok(n as i64)
    } else {
        Err(D::Error::custom("peakId must be a positive integer"))
    }
}

/// 秒数允许带小数，四舍五入到整秒
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let secs = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN).round(),
        _ => f64::NAN,
    };
    if secs.is_finite() && secs.abs() <= i32::MAX as f64 {
        Ok(secs as i32)
    } else {
        Err(D::Error::custom("durationSec must be a number"))
    }
}

/// 新建徒步记录请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHikeRequest {
    #[serde(deserialize_with = "lenient_id")]
    pub peak_id: i64,
    pub started_at: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_seconds")]
    pub duration_sec: i32,
    pub track_distance_km: f64,
    pub straight_distance_km: Option<f64>,
    pub track: Vec<TrackPointRequest>,
}

impl CreateHikeRequest {
    /// 拆分为记录头与原始轨迹
    pub fn into_parts(self) -> (NewHike, Vec<RawPoint>) {
        let track = self.track.iter().map(RawPoint::from).collect();
        let hike = NewHike {
            peak_id: self.peak_id,
            started_at: self.started_at,
            duration_sec: self.duration_sec,
            track_distance_km: self.track_distance_km,
            straight_distance_km: self.straight_distance_km,
        };
        (hike, track)
    }
}

/// 山峰列表查询参数
///
/// 分页与排序参数宽松解析：无法识别的取值回退为默认值
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PeakListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub main_trail_color: Option<TrailColor>,
    pub mountain_range: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

fn parse_number(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<PeakListParams> for PeakQuery {
    fn from(params: PeakListParams) -> Self {
        let sort = match params.sort.as_deref() {
            Some("name") => PeakSort::Name,
            Some("difficulty") => PeakSort::Difficulty,
            _ => PeakSort::Height,
        };
        let dir = match params.dir.map(|d| d.to_lowercase()).as_deref() {
            Some("asc") => Some(SortDirection::Asc),
            Some("desc") => Some(SortDirection::Desc),
            _ => None,
        };

        PeakQuery {
            difficulty: params.difficulty,
            main_trail_color: params.main_trail_color,
            mountain_range: non_empty(params.mountain_range),
            search: non_empty(params.search),
            sort,
            dir,
            page: parse_number(params.page.as_deref()),
            limit: parse_number(params.limit.as_deref()),
        }
        .normalized()
    }
}

/// 路线规划查询参数（用户当前位置）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RouteParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_point_coercion() {
        let req: CreateHikeRequest = serde_json::from_value(json!({
            "peakId": 3,
            "startedAt": "2024-07-14T06:30:00Z",
            "durationSec": 5400,
            "trackDistanceKm": 7.2,
            "track": [
                { "lat": 49.1, "lng": 19.9 },
                { "lat": "49.2", "lng": "19.95" },
                { "lat": null, "lng": 19.9 },
                { "lat": "north", "lng": 19.9 }
            ]
        }))
        .unwrap();

        let (hike, track) = req.into_parts();
        assert_eq!(hike.peak_id, 3);
        assert!(hike.straight_distance_km.is_none());
        assert_eq!(track[1], RawPoint { lat: 49.2, lng: 19.95 });
        assert!(track[2].lat.is_nan());
        assert!(track[3].lat.is_nan());
    }

    fn hike_with(peak_id: Value, duration: Value) -> serde_json::Result<CreateHikeRequest> {
        serde_json::from_value(json!({
            "peakId": peak_id,
            "startedAt": "2024-07-14T06:30:00Z",
            "durationSec": duration,
            "trackDistanceKm": 7.2,
            "track": [{ "lat": 49.1, "lng": 19.9 }]
        }))
    }

    #[test]
    fn test_hike_lenient_peak_id_and_duration() {
        let req = hike_with(json!("7"), json!(5400.6)).unwrap();
        assert_eq!(req.peak_id, 7);
        assert_eq!(req.duration_sec, 5401);

        let req = hike_with(json!(7.0), json!(90)).unwrap();
        assert_eq!(req.peak_id, 7);
        assert_eq!(req.duration_sec, 90);
    }

    #[test]
    fn test_hike_rejects_non_numeric_fields() {
        assert!(hike_with(json!("Rysy"), json!(90)).is_err());
        assert!(hike_with(json!(7.5), json!(90)).is_err());
        assert!(hike_with(json!(null), json!(90)).is_err());
        assert!(hike_with(json!(7), json!("90")).is_err());
        assert!(hike_with(json!(7), json!(1e12)).is_err());
    }

    #[test]
    fn test_peak_params_defaults() {
        let query = PeakQuery::from(PeakListParams::default());
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 50);
        assert_eq!(query.sort, PeakSort::Height);
        assert_eq!(query.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_peak_params_lenient_parsing() {
        let query = PeakQuery::from(PeakListParams {
            page: Some("abc".to_string()),
            limit: Some("500".to_string()),
            sort: Some("popularity".to_string()),
            dir: Some("DESC".to_string()),
            search: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 200);
        assert_eq!(query.sort, PeakSort::Height);
        assert_eq!(query.dir, Some(SortDirection::Desc));
        assert!(query.search.is_none());
    }

    #[test]
    fn test_change_password_validation() {
        let req = ChangePasswordRequest {
            old_password: "secret1".to_string(),
            new_password: "12345".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("New password too short"));
    }

    #[test]
    fn test_profile_update_conversion() {
        let update = ProfileUpdate::from(UpdateProfileRequest {
            username: Some("  ".to_string()),
            allow_location_sharing: None,
        });
        assert!(update.is_empty());
    }
}
