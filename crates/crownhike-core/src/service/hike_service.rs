//! 徒步记录服务

use std::sync::Arc;

use tracing::{info, instrument};

use crownhike_shared::observability::metrics;

use crate::error::{CoreError, Result};
use crate::models::{HikeDetail, HikeSummary, NewHike, RawPoint, sanitize_track};
use crate::repository::{HikeRepositoryTrait, PeakRepositoryTrait};

/// 徒步记录服务
pub struct HikeService<PR, HR>
where
    PR: PeakRepositoryTrait,
    HR: HikeRepositoryTrait,
{
    peak_repo: Arc<PR>,
    hike_repo: Arc<HR>,
}

impl<PR, HR> HikeService<PR, HR>
where
    PR: PeakRepositoryTrait,
    HR: HikeRepositoryTrait,
{
    pub fn new(peak_repo: Arc<PR>, hike_repo: Arc<HR>) -> Self {
        Self {
            peak_repo,
            hike_repo,
        }
    }

    /// 保存一次徒步及其轨迹
    ///
    /// 非有限坐标的点会被丢弃，保留下来的点沿用其在提交轨迹中的下标。
    /// 记录与轨迹点在同一事务中写入，任一点写入失败则整条记录都不会保存。
    #[instrument(skip(self, hike, raw_track), fields(peak_id = hike.peak_id, points = raw_track.len()))]
    pub async fn record_hike(
        &self,
        user_id: i64,
        hike: NewHike,
        raw_track: &[RawPoint],
    ) -> Result<i64> {
        validate_hike(&hike, raw_track)?;

        if self.peak_repo.get_peak(hike.peak_id).await?.is_none() {
            return Err(CoreError::PeakNotFound(hike.peak_id));
        }

        let track = sanitize_track(raw_track);
        let hike_id = match self.hike_repo.create_hike(user_id, &hike, &track).await {
            Ok(id) => id,
            Err(e) => {
                metrics::record_hike("error");
                return Err(e);
            }
        };

        metrics::record_hike("success");
        info!(
            user_id,
            hike_id,
            kept = track.len(),
            dropped = raw_track.len() - track.len(),
            "Hike recorded"
        );
        Ok(hike_id)
    }

    /// 用户的徒步记录，按开始时间倒序
    pub async fn list_hikes(&self, user_id: i64) -> Result<Vec<HikeSummary>> {
        self.hike_repo.list_hikes(user_id).await
    }

    /// 单条徒步记录详情，他人的记录视为不存在
    pub async fn get_hike(&self, user_id: i64, hike_id: i64) -> Result<HikeDetail> {
        if hike_id <= 0 {
            return Err(CoreError::Validation("Invalid id".to_string()));
        }

        let summary = self
            .hike_repo
            .get_hike(user_id, hike_id)
            .await?
            .ok_or(CoreError::HikeNotFound(hike_id))?;
        let track = self.hike_repo.list_track(hike_id).await?;

        Ok(HikeDetail {
            user_id,
            summary,
            track,
        })
    }
}

fn validate_hike(hike: &NewHike, raw_track: &[RawPoint]) -> Result<()> {
    if hike.peak_id <= 0 {
        return Err(CoreError::Validation("peakId must be a positive integer".to_string()));
    }
    if hike.duration_sec < 0 {
        return Err(CoreError::Validation("durationSec must not be negative".to_string()));
    }
    if !(hike.track_distance_km.is_finite() && hike.track_distance_km >= 0.0) {
        return Err(CoreError::Validation(
            "trackDistanceKm must be a non-negative number".to_string(),
        ));
    }
    if let Some(straight) = hike.straight_distance_km
        && !(straight.is_finite() && straight >= 0.0)
    {
        return Err(CoreError::Validation(
            "straightDistanceKm must be a non-negative number".to_string(),
        ));
    }
    if raw_track.is_empty() {
        return Err(CoreError::Validation("track must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Peak, TrackPoint, TrailColor};
    use crate::repository::{MockHikeRepositoryTrait, MockPeakRepositoryTrait};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn giewont() -> Peak {
        Peak {
            id: 2,
            name: "Giewont".to_string(),
            region: "Tatry Zachodnie".to_string(),
            elevation_m: 1894,
            difficulty: Difficulty::Moderate,
            main_trail_color: TrailColor::Blue,
            lat: Some(49.2506),
            lng: Some(19.9336),
            description: None,
        }
    }

    fn new_hike(peak_id: i64) -> NewHike {
        NewHike {
            peak_id,
            started_at: Utc.with_ymd_and_hms(2024, 7, 14, 6, 30, 0).unwrap(),
            duration_sec: 5400,
            track_distance_km: 7.2,
            straight_distance_km: Some(3.1),
        }
    }

    fn point(lat: f64, lng: f64) -> RawPoint {
        RawPoint { lat, lng }
    }

    fn summary(id: i64) -> HikeSummary {
        HikeSummary {
            id,
            peak_id: 2,
            peak_name: "Giewont".to_string(),
            peak_height_m: 1894,
            peak_range: "Tatry Zachodnie".to_string(),
            started_at: Utc.with_ymd_and_hms(2024, 7, 14, 6, 30, 0).unwrap(),
            duration_sec: 5400,
            track_distance_km: 7.2,
            straight_distance_km: Some(3.1),
            created_at: Utc.with_ymd_and_hms(2024, 7, 14, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_record_drops_non_finite_points() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks.expect_get_peak().with(eq(2)).returning(|_| Ok(Some(giewont())));

        let mut hikes = MockHikeRepositoryTrait::new();
        hikes
            .expect_create_hike()
            .withf(|user_id, _, track| {
                *user_id == 1
                    && track.iter().map(|p| p.seq).collect::<Vec<_>>() == vec![0, 2]
            })
            .times(1)
            .returning(|_, _, _| Ok(42));

        let service = HikeService::new(Arc::new(peaks), Arc::new(hikes));
        let raw = vec![point(49.1, 19.9), point(f64::NAN, 19.9), point(49.2, 19.95)];
        let id = service.record_hike(1, new_hike(2), &raw).await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_record_rejects_invalid_input() {
        let mut hikes = MockHikeRepositoryTrait::new();
        hikes.expect_create_hike().never();
        let service = HikeService::new(Arc::new(MockPeakRepositoryTrait::new()), Arc::new(hikes));
        let track = vec![point(49.1, 19.9)];

        let err = service.record_hike(1, new_hike(0), &track).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = service.record_hike(1, new_hike(2), &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let mut negative = new_hike(2);
        negative.duration_sec = -1;
        let err = service.record_hike(1, negative, &track).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let mut nan = new_hike(2);
        nan.track_distance_km = f64::NAN;
        let err = service.record_hike(1, nan, &track).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_unknown_peak() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks.expect_get_peak().returning(|_| Ok(None));
        let mut hikes = MockHikeRepositoryTrait::new();
        hikes.expect_create_hike().never();

        let service = HikeService::new(Arc::new(peaks), Arc::new(hikes));
        let err = service
            .record_hike(1, new_hike(77), &[point(49.1, 19.9)])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PeakNotFound(77)));
    }

    #[tokio::test]
    async fn test_get_hike_of_other_user_is_not_found() {
        let mut hikes = MockHikeRepositoryTrait::new();
        hikes
            .expect_get_hike()
            .with(eq(2), eq(10))
            .returning(|_, _| Ok(None));
        hikes.expect_list_track().never();

        let service = HikeService::new(Arc::new(MockPeakRepositoryTrait::new()), Arc::new(hikes));
        let err = service.get_hike(2, 10).await.unwrap_err();
        assert!(matches!(err, CoreError::HikeNotFound(10)));
    }

    #[tokio::test]
    async fn test_get_hike_with_track() {
        let mut hikes = MockHikeRepositoryTrait::new();
        hikes.expect_get_hike().returning(|_, id| Ok(Some(summary(id))));
        hikes.expect_list_track().with(eq(10)).returning(|_| {
            Ok(vec![
                TrackPoint { seq: 0, lat: 49.1, lng: 19.9 },
                TrackPoint { seq: 3, lat: 49.2, lng: 19.95 },
            ])
        });

        let service = HikeService::new(Arc::new(MockPeakRepositoryTrait::new()), Arc::new(hikes));
        let detail = service.get_hike(1, 10).await.unwrap();
        assert_eq!(detail.summary.id, 10);
        assert_eq!(detail.track.len(), 2);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 10);
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["track"][1]["seq"], 3);
    }
}
