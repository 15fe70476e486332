//! 仓储 Trait 定义
//!
//! 服务层依赖这些接口而非具体实现，测试中使用 mockall 生成的 Mock 替身

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    Badge, ClimbedPeak, EmergencyCard, HikeSummary, MarkPeak, NewHike, NewUser, Peak, PeakQuery,
    ProfileUpdate, TrackPoint, UserCredentials, UserProfile,
};

/// 山峰目录仓储接口（只读）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeakRepositoryTrait: Send + Sync {
    async fn list_peaks(&self, query: &PeakQuery) -> Result<Vec<Peak>>;
    async fn get_peak(&self, id: i64) -> Result<Option<Peak>>;
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 创建用户，邮箱重复时返回 `CoreError::EmailTaken`
    async fn create_user(&self, user: &NewUser) -> Result<i64>;
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    async fn find_credentials_by_id(&self, id: i64) -> Result<Option<UserCredentials>>;
    async fn get_profile(&self, id: i64) -> Result<Option<UserProfile>>;
    /// 返回是否有记录被更新
    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<bool>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    /// 在同一事务中删除用户及其全部关联数据
    async fn delete_user(&self, id: i64) -> Result<bool>;
}

/// 登顶记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AscentRepositoryTrait: Send + Sync {
    /// 写入登顶记录，重复登顶时返回 `CoreError::PeakAlreadyClimbed`
    async fn insert_ascent(&self, user_id: i64, peak_id: i64, mark: &MarkPeak) -> Result<i64>;
    /// 用户登顶过的不同山峰数
    async fn count_distinct_peaks(&self, user_id: i64) -> Result<i64>;
    /// [from, to) 区间内的登顶记录数
    async fn count_ascents_between(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64>;
    /// 用户在指定山峰上最近一次登顶时间
    async fn latest_ascent_at(&self, user_id: i64, peak_id: i64)
    -> Result<Option<DateTime<Utc>>>;
    async fn list_climbed(&self, user_id: i64) -> Result<Vec<ClimbedPeak>>;
}

/// 徒步记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HikeRepositoryTrait: Send + Sync {
    /// 在一个事务中写入徒步记录及其轨迹点，返回新记录 ID
    async fn create_hike(&self, user_id: i64, hike: &NewHike, track: &[TrackPoint])
    -> Result<i64>;
    async fn list_hikes(&self, user_id: i64) -> Result<Vec<HikeSummary>>;
    /// 仅返回属于该用户的记录
    async fn get_hike(&self, user_id: i64, hike_id: i64) -> Result<Option<HikeSummary>>;
    async fn list_track(&self, hike_id: i64) -> Result<Vec<TrackPoint>>;
}

/// 徽章仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    async fn list_badges(&self) -> Result<Vec<Badge>>;
    async fn list_user_badges(&self, user_id: i64) -> Result<Vec<Badge>>;
    /// 所有设置了 required_peaks 的徽章
    async fn list_threshold_badges(&self) -> Result<Vec<Badge>>;
    async fn held_badge_ids(&self, user_id: i64) -> Result<Vec<i64>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Badge>>;
    /// 批量发放（已持有的跳过），返回实际新写入的徽章 ID
    async fn insert_user_badges(&self, user_id: i64, badge_ids: &[i64]) -> Result<Vec<i64>>;
    /// 单个发放，返回是否新写入
    async fn insert_user_badge(&self, user_id: i64, badge_id: i64) -> Result<bool>;
}

/// 紧急信息卡仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmergencyRepositoryTrait: Send + Sync {
    async fn get_card(&self, user_id: i64) -> Result<Option<EmergencyCard>>;
    async fn upsert_card(&self, user_id: i64, card: &EmergencyCard) -> Result<()>;
}
