//! 山峰目录服务

use std::sync::Arc;

use tracing::instrument;

use crate::error::{CoreError, Result};
use crate::models::{Peak, PeakQuery};
use crate::repository::PeakRepositoryTrait;
use crate::routing::{GeoPoint, PlannedRoute, RoutePlanner};

/// 山峰目录服务
pub struct PeakService<PR>
where
    PR: PeakRepositoryTrait,
{
    peak_repo: Arc<PR>,
    planner: Arc<dyn RoutePlanner>,
}

impl<PR> PeakService<PR>
where
    PR: PeakRepositoryTrait,
{
    pub fn new(peak_repo: Arc<PR>, planner: Arc<dyn RoutePlanner>) -> Self {
        Self { peak_repo, planner }
    }

    /// 分页查询，返回规整后的查询条件与当前页数据
    pub async fn list_peaks(&self, query: PeakQuery) -> Result<(PeakQuery, Vec<Peak>)> {
        let query = query.normalized();
        let peaks = self.peak_repo.list_peaks(&query).await?;
        Ok((query, peaks))
    }

    pub async fn get_peak(&self, id: i64) -> Result<Peak> {
        if id <= 0 {
            return Err(CoreError::Validation("Invalid id".to_string()));
        }
        self.peak_repo
            .get_peak(id)
            .await?
            .ok_or(CoreError::PeakNotFound(id))
    }

    /// 规划从 `from` 到山峰的徒步路线
    #[instrument(skip(self))]
    pub async fn plan_route(&self, peak_id: i64, from: GeoPoint) -> Result<PlannedRoute> {
        if !(from.lat.is_finite() && (-90.0..=90.0).contains(&from.lat))
            || !(from.lng.is_finite() && (-180.0..=180.0).contains(&from.lng))
        {
            return Err(CoreError::Validation(
                "lat and lng query parameters are required".to_string(),
            ));
        }

        let peak = self.get_peak(peak_id).await?;
        let (lat, lng) = peak
            .coordinates()
            .ok_or(CoreError::PeakWithoutCoordinates(peak_id))?;

        self.planner.plan(from, GeoPoint::new(lat, lng)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, PeakSort, TrailColor};
    use crate::repository::MockPeakRepositoryTrait;
    use crate::routing::MockRoutePlanner;
    use mockall::predicate::eq;

    fn kasprowy(lat: Option<f64>, lng: Option<f64>) -> Peak {
        Peak {
            id: 4,
            name: "Kasprowy Wierch".to_string(),
            region: "Tatry Zachodnie".to_string(),
            elevation_m: 1987,
            difficulty: Difficulty::Easy,
            main_trail_color: TrailColor::Green,
            lat,
            lng,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_normalizes_paging() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks
            .expect_list_peaks()
            .withf(|q| q.page == 1 && q.limit == 200 && q.sort == PeakSort::Height)
            .returning(|_| Ok(vec![]));

        let service = PeakService::new(Arc::new(peaks), Arc::new(MockRoutePlanner::new()));
        let (query, data) = service
            .list_peaks(PeakQuery {
                page: -3,
                limit: 5000,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(query.limit, 200);
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_route_to_peak() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks
            .expect_get_peak()
            .with(eq(4))
            .returning(|_| Ok(Some(kasprowy(Some(49.2319), Some(19.9817)))));

        let mut planner = MockRoutePlanner::new();
        planner
            .expect_plan()
            .with(eq(GeoPoint::new(49.29, 19.96)), eq(GeoPoint::new(49.2319, 19.9817)))
            .returning(|from, to| {
                Ok(PlannedRoute {
                    path: vec![from, to],
                    distance_m: 8200.0,
                    duration_s: 11000.0,
                })
            });

        let service = PeakService::new(Arc::new(peaks), Arc::new(planner));
        let route = service
            .plan_route(4, GeoPoint::new(49.29, 19.96))
            .await
            .unwrap();
        assert_eq!(route.path.len(), 2);
        assert_eq!(route.distance_m, 8200.0);
    }

    #[tokio::test]
    async fn test_route_peak_without_coordinates() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks
            .expect_get_peak()
            .returning(|_| Ok(Some(kasprowy(None, Some(19.98)))));
        let mut planner = MockRoutePlanner::new();
        planner.expect_plan().never();

        let service = PeakService::new(Arc::new(peaks), Arc::new(planner));
        let err = service
            .plan_route(4, GeoPoint::new(49.29, 19.96))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PeakWithoutCoordinates(4)));
    }

    #[tokio::test]
    async fn test_route_rejects_bad_origin() {
        let mut planner = MockRoutePlanner::new();
        planner.expect_plan().never();
        let service = PeakService::new(Arc::new(MockPeakRepositoryTrait::new()), Arc::new(planner));

        let err = service
            .plan_route(4, GeoPoint::new(f64::NAN, 19.96))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = service
            .plan_route(4, GeoPoint::new(95.0, 19.96))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_peak() {
        let mut peaks = MockPeakRepositoryTrait::new();
        peaks.expect_get_peak().returning(|_| Ok(None));
        let service = PeakService::new(Arc::new(peaks), Arc::new(MockRoutePlanner::new()));

        assert!(matches!(
            service.get_peak(12).await.unwrap_err(),
            CoreError::PeakNotFound(12)
        ));
        assert!(matches!(
            service.get_peak(0).await.unwrap_err(),
            CoreError::Validation(_)
        ));
    }
}
