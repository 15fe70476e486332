//! 登顶记录仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::AscentRepositoryTrait;
use crate::error::{CoreError, Result, is_unique_violation};
use crate::models::{ClimbedPeak, MarkPeak};

/// 登顶记录仓储
///
/// (user_id, peak_id) 在表上唯一，同一用户同一山峰只记录一次
pub struct AscentRepository {
    pool: PgPool,
}

impl AscentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 写入登顶记录
    pub async fn insert_ascent(&self, user_id: i64, peak_id: i64, mark: &MarkPeak) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_peaks (user_id, peak_id, lat, lng, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(peak_id)
        .bind(mark.lat)
        .bind(mark.lng)
        .bind(mark.photo_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoreError::PeakAlreadyClimbed(peak_id)
            } else {
                CoreError::Database(e)
            }
        })?;

        Ok(id)
    }

    pub async fn count_distinct_peaks(&self, user_id: i64) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT peak_id) FROM user_peaks WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn count_ascents_between(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM user_peaks
            WHERE user_id = $1 AND marked_at >= $2 AND marked_at < $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn latest_ascent_at(
        &self,
        user_id: i64,
        peak_id: i64,
    ) -> Result<Option<DateTime<Utc>>> {
        let marked_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT marked_at
            FROM user_peaks
            WHERE user_id = $1 AND peak_id = $2
            ORDER BY marked_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(peak_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(marked_at)
    }

    /// 用户已登顶的山峰，最近的在前
    pub async fn list_climbed(&self, user_id: i64) -> Result<Vec<ClimbedPeak>> {
        let rows = sqlx::query_as::<_, ClimbedPeak>(
            r#"
            SELECT up.id, up.peak_id, up.marked_at, p.name, p.height_m, p.mountain_range,
                   p.lat, p.lng, up.photo_url
            FROM user_peaks up
            JOIN peaks p ON p.id = up.peak_id
            WHERE up.user_id = $1
            ORDER BY up.marked_at DESC, up.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl AscentRepositoryTrait for AscentRepository {
    async fn insert_ascent(&self, user_id: i64, peak_id: i64, mark: &MarkPeak) -> Result<i64> {
        self.insert_ascent(user_id, peak_id, mark).await
    }

    async fn count_distinct_peaks(&self, user_id: i64) -> Result<i64> {
        self.count_distinct_peaks(user_id).await
    }

    async fn count_ascents_between(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64> {
        self.count_ascents_between(user_id, from, to).await
    }

    async fn latest_ascent_at(
        &self,
        user_id: i64,
        peak_id: i64,
    ) -> Result<Option<DateTime<Utc>>> {
        self.latest_ascent_at(user_id, peak_id).await
    }

    async fn list_climbed(&self, user_id: i64) -> Result<Vec<ClimbedPeak>> {
        self.list_climbed(user_id).await
    }
}
