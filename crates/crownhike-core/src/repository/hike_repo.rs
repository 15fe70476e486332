//! 徒步记录仓储
//!
//! 记录头与轨迹点必须在同一事务中写入

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::traits::HikeRepositoryTrait;
use crate::error::Result;
use crate::models::{HikeSummary, NewHike, TrackPoint};

/// 单条 INSERT 最多携带的轨迹点数（每点 4 个参数，低于 Postgres 65535 的绑定上限）
const POINTS_PER_INSERT: usize = 5000;

const SUMMARY_COLUMNS: &str = r#"
    h.id, h.peak_id,
    p.name AS peak_name,
    p.height_m AS peak_height_m,
    p.mountain_range AS peak_range,
    h.started_at, h.duration_sec, h.track_distance_km, h.straight_distance_km, h.created_at
"#;

/// 徒步记录仓储
pub struct HikeRepository {
    pool: PgPool,
}

impl HikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 写入徒步记录与轨迹点
    ///
    /// 事务在提交前被 drop（任何 `?` 提前返回）时自动回滚，记录头与轨迹点要么都可见要么都不可见
    pub async fn create_hike(
        &self,
        user_id: i64,
        hike: &NewHike,
        track: &[TrackPoint],
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let hike_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO hikes
                (user_id, peak_id, started_at, duration_sec, track_distance_km, straight_distance_km)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(hike.peak_id)
        .bind(hike.started_at)
        .bind(hike.duration_sec)
        .bind(hike.track_distance_km)
        .bind(hike.straight_distance_km)
        .fetch_one(&mut *tx)
        .await?;

        for chunk in track.chunks(POINTS_PER_INSERT) {
            let mut qb =
                QueryBuilder::<Postgres>::new("INSERT INTO hike_points (hike_id, seq, lat, lng) ");
            qb.push_values(chunk, |mut row, point| {
                row.push_bind(hike_id)
                    .push_bind(point.seq)
                    .push_bind(point.lat)
                    .push_bind(point.lng);
            });
            qb.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        debug!(hike_id, points = track.len(), "Hike persisted");
        Ok(hike_id)
    }

    /// 用户的徒步记录，最近开始的在前
    pub async fn list_hikes(&self, user_id: i64) -> Result<Vec<HikeSummary>> {
        let rows = sqlx::query_as::<_, HikeSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM hikes h
            JOIN peaks p ON p.id = h.peak_id
            WHERE h.user_id = $1
            ORDER BY h.started_at DESC, h.id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_hike(&self, user_id: i64, hike_id: i64) -> Result<Option<HikeSummary>> {
        let row = sqlx::query_as::<_, HikeSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM hikes h
            JOIN peaks p ON p.id = h.peak_id
            WHERE h.id = $1 AND h.user_id = $2
            "#
        ))
        .bind(hike_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_track(&self, hike_id: i64) -> Result<Vec<TrackPoint>> {
        let points = sqlx::query_as::<_, TrackPoint>(
            "SELECT seq, lat, lng FROM hike_points WHERE hike_id = $1 ORDER BY seq ASC",
        )
        .bind(hike_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}

#[async_trait]
impl HikeRepositoryTrait for HikeRepository {
    async fn create_hike(
        &self,
        user_id: i64,
        hike: &NewHike,
        track: &[TrackPoint],
    ) -> Result<i64> {
        self.create_hike(user_id, hike, track).await
    }

    async fn list_hikes(&self, user_id: i64) -> Result<Vec<HikeSummary>> {
        self.list_hikes(user_id).await
    }

    async fn get_hike(&self, user_id: i64, hike_id: i64) -> Result<Option<HikeSummary>> {
        self.get_hike(user_id, hike_id).await
    }

    async fn list_track(&self, hike_id: i64) -> Result<Vec<TrackPoint>> {
        self.list_track(hike_id).await
    }
}
