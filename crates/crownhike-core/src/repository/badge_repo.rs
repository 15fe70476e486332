//! 徽章仓储
//!
//! 徽章目录读取与用户徽章发放。发放统一使用 `ON CONFLICT DO NOTHING`，
//! 由 (user_id, badge_id) 唯一约束保证同一徽章最多发放一次。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::BadgeRepositoryTrait;
use crate::error::Result;
use crate::models::Badge;

/// 徽章仓储
pub struct BadgeRepository {
    pool: PgPool,
}

impl BadgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 完整徽章目录
    pub async fn list_badges(&self) -> Result<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            "SELECT id, code, name, description, required_peaks FROM badges ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    /// 用户已获得的徽章
    pub async fn list_user_badges(&self, user_id: i64) -> Result<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT b.id, b.code, b.name, b.description, b.required_peaks
            FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    pub async fn list_threshold_badges(&self) -> Result<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT id, code, name, description, required_peaks
            FROM badges
            WHERE required_peaks IS NOT NULL
            ORDER BY required_peaks, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    pub async fn held_badge_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT badge_id FROM user_badges WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Badge>> {
        let badge = sqlx::query_as::<_, Badge>(
            "SELECT id, code, name, description, required_peaks FROM badges WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(badge)
    }

    /// 批量发放，返回本次实际写入的徽章 ID（并发写入中落败的不会出现在结果里）
    pub async fn insert_user_badges(&self, user_id: i64, badge_ids: &[i64]) -> Result<Vec<i64>> {
        if badge_ids.is_empty() {
            return Ok(vec![]);
        }

        let inserted: Vec<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO user_badges (user_id, badge_id)
            SELECT $1, badge_id FROM UNNEST($2::BIGINT[]) AS t(badge_id)
            ON CONFLICT (user_id, badge_id) DO NOTHING
            RETURNING badge_id
            "#,
        )
        .bind(user_id)
        .bind(badge_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// 单个发放，已持有时返回 false
    pub async fn insert_user_badge(&self, user_id: i64, badge_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_badges (user_id, badge_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, badge_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(badge_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl BadgeRepositoryTrait for BadgeRepository {
    async fn list_badges(&self) -> Result<Vec<Badge>> {
        self.list_badges().await
    }

    async fn list_user_badges(&self, user_id: i64) -> Result<Vec<Badge>> {
        self.list_user_badges(user_id).await
    }

    async fn list_threshold_badges(&self) -> Result<Vec<Badge>> {
        self.list_threshold_badges().await
    }

    async fn held_badge_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.held_badge_ids(user_id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Badge>> {
        self.find_by_code(code).await
    }

    async fn insert_user_badges(&self, user_id: i64, badge_ids: &[i64]) -> Result<Vec<i64>> {
        self.insert_user_badges(user_id, badge_ids).await
    }

    async fn insert_user_badge(&self, user_id: i64, badge_id: i64) -> Result<bool> {
        self.insert_user_badge(user_id, badge_id).await
    }
}
