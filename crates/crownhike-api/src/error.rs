//! HTTP 层错误类型
//!
//! 所有错误响应统一为 `{"ok": false, "code": ..., "error": ...}`

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crownhike_core::CoreError;

/// 系统错误对外只返回的通用提示
const INTERNAL_MESSAGE: &str = "Internal server error";

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid old password")]
    InvalidOldPassword,

    // 参数错误
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    // 领域错误
    #[error(transparent)]
    Core(#[from] CoreError),

    // 系统错误
    #[error("DB not reachable")]
    DatabaseUnavailable,
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials | Self::InvalidOldPassword => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Core(e) => core_status(e),
            Self::DatabaseUnavailable | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOldPassword => "INVALID_OLD_PASSWORD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Core(e) => e.error_code(),
            Self::DatabaseUnavailable => "DB_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 对外展示的错误信息，系统错误不暴露细节
    fn public_message(&self) -> String {
        match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Core(e @ (CoreError::Database(_) | CoreError::Internal(_))) => {
                tracing::error!(error = %e, "领域层系统错误");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Core(e @ (CoreError::RoutePlanner(_) | CoreError::UnknownBadgeCode(_))) => {
                tracing::error!(error = %e, "外部依赖或数据错误");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Core(CoreError::Validation(msg)) => msg.clone(),
            Self::Core(CoreError::PeakNotFound(_)) => "Peak not found".to_string(),
            Self::Core(CoreError::HikeNotFound(_)) => "Hike not found".to_string(),
            Self::Core(CoreError::UserNotFound(_)) => "User not found".to_string(),
            Self::Core(CoreError::PeakWithoutCoordinates(_)) => {
                "Peak or coords not found".to_string()
            }
            other => other.to_string(),
        }
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::PeakNotFound(_)
        | CoreError::HikeNotFound(_)
        | CoreError::UserNotFound(_)
        | CoreError::RouteNotFound
        | CoreError::PeakWithoutCoordinates(_) => StatusCode::NOT_FOUND,
        CoreError::PeakAlreadyClimbed(_) | CoreError::EmailTaken | CoreError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::UnknownBadgeCode(_)
        | CoreError::RoutePlannerUnavailable
        | CoreError::RoutePlanner(_)
        | CoreError::Database(_)
        | CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "ok": false,
            "code": self.error_code(),
            "error": self.public_message(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体无法解析
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 路径参数（ID）无法解析
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::Validation("Invalid id".to_string())
    }
}

/// HTTP 层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
