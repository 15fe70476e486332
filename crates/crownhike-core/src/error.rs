//! 领域错误类型
//!
//! 定义登顶、轨迹、徽章发放等业务错误以及底层系统错误

use thiserror::Error;

/// 领域错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    // === 资源不存在 ===
    #[error("Peak not found: {0}")]
    PeakNotFound(i64),

    #[error("Hike not found: {0}")]
    HikeNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Peak has no coordinates: {0}")]
    PeakWithoutCoordinates(i64),

    // === 冲突 ===
    #[error("Peak already marked as completed: {0}")]
    PeakAlreadyClimbed(i64),

    #[error("Email already registered")]
    EmailTaken,

    // === 徽章 ===
    /// 徽章目录中没有该编码，由规则评估方降级为 warn 并跳过
    #[error("Badge with code {0} not found")]
    UnknownBadgeCode(String),

    // === 参数 ===
    #[error("Validation failed: {0}")]
    Validation(String),

    // === 外部依赖 ===
    #[error("Route planner not configured")]
    RoutePlannerUnavailable,

    #[error("Route planner request failed: {0}")]
    RoutePlanner(String),

    // === 系统错误 ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 领域 Result 类型别名
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::RoutePlanner(_)
                | Self::RoutePlannerUnavailable
        )
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeakNotFound(_) => "PEAK_NOT_FOUND",
            Self::HikeNotFound(_) => "HIKE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::PeakWithoutCoordinates(_) => "PEAK_COORDINATES_MISSING",
            Self::PeakAlreadyClimbed(_) => "PEAK_ALREADY_CLIMBED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UnknownBadgeCode(_) => "UNKNOWN_BADGE_CODE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RoutePlannerUnavailable => "ROUTE_PLANNER_UNAVAILABLE",
            Self::RoutePlanner(_) => "ROUTE_PLANNER_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// 判断 sqlx 错误是否为唯一约束冲突
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
