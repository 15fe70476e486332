//! 响应 DTO 定义
//!
//! 所有成功响应都带 `"ok": true`

use chrono::{DateTime, Utc};
use serde::Serialize;

use crownhike_core::{Badge, MarkPeakOutcome, Peak, PeakQuery};

/// 单个数据响应 `{ok, data}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// 列表响应 `{ok, count, data}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub ok: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            ok: true,
            count: data.len(),
            data,
        }
    }
}

/// 山峰分页响应
#[derive(Debug, Serialize)]
pub struct PeakPageResponse {
    pub ok: bool,
    pub page: i64,
    pub limit: i64,
    pub count: usize,
    pub data: Vec<Peak>,
}

impl PeakPageResponse {
    pub fn new(query: &PeakQuery, data: Vec<Peak>) -> Self {
        Self {
            ok: true,
            page: query.page,
            limit: query.limit,
            count: data.len(),
            data,
        }
    }
}

/// 仅确认成功 `{ok: true}`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// 带提示信息的确认 `{ok, message}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}

/// 注册响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub ok: bool,
    pub user_id: i64,
}

/// 登录用户信息
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: LoginUser,
    pub token: String,
    /// Token 有效期（秒）
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

/// 登顶响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPeakResponse {
    pub ok: bool,
    pub message: String,
    pub awarded_badges: Vec<Badge>,
    pub awarded_special_badges: Vec<String>,
}

impl From<MarkPeakOutcome> for MarkPeakResponse {
    fn from(outcome: MarkPeakOutcome) -> Self {
        Self {
            ok: true,
            message: format!("Marked peak: {}", outcome.peak_name),
            awarded_badges: outcome.awarded_badges,
            awarded_special_badges: outcome.awarded_special_badges,
        }
    }
}

/// 新建记录的 ID
#[derive(Debug, Serialize)]
pub struct CreatedId {
    pub id: i64,
}

/// 手动触发阈值徽章判定的响应
#[derive(Debug, Serialize)]
pub struct AwardResponse {
    pub ok: bool,
    pub awarded: Vec<Badge>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub time: DateTime<Utc>,
}

/// Token 中的身份
#[derive(Debug, Serialize)]
pub struct IdentityDto {
    pub id: i64,
    pub email: String,
}

/// 受保护接口的连通性检查响应
#[derive(Debug, Serialize)]
pub struct ProfileCheckResponse {
    pub ok: bool,
    pub message: &'static str,
    pub user: IdentityDto,
}
