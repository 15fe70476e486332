//! 登顶服务
//!
//! 登顶流程：
//! 1. 校验山峰存在 -> 2. 写入登顶记录（重复登顶返回冲突）
//!    -> 3. 数量阈值徽章 -> 4. 登顶特殊徽章

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crownhike_shared::observability::metrics;

use super::award::BadgeEngine;
use crate::error::{CoreError, Result};
use crate::models::{ClimbedPeak, MarkPeak, MarkPeakOutcome};
use crate::repository::{AscentRepositoryTrait, BadgeRepositoryTrait, PeakRepositoryTrait};

/// 登顶服务
pub struct AscentService<PR, AR, BR>
where
    PR: PeakRepositoryTrait,
    AR: AscentRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    peak_repo: Arc<PR>,
    ascent_repo: Arc<AR>,
    engine: Arc<BadgeEngine<BR, AR>>,
}

impl<PR, AR, BR> AscentService<PR, AR, BR>
where
    PR: PeakRepositoryTrait,
    AR: AscentRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    pub fn new(peak_repo: Arc<PR>, ascent_repo: Arc<AR>, engine: Arc<BadgeEngine<BR, AR>>) -> Self {
        Self {
            peak_repo,
            ascent_repo,
            engine,
        }
    }

    /// 标记山峰为已登顶，返回本次新获得的徽章
    #[instrument(skip(self, mark))]
    pub async fn mark_peak(
        &self,
        user_id: i64,
        peak_id: i64,
        mark: MarkPeak,
    ) -> Result<MarkPeakOutcome> {
        if peak_id <= 0 {
            return Err(CoreError::Validation("Invalid peak id".to_string()));
        }
        validate_position(&mark)?;

        let peak = self
            .peak_repo
            .get_peak(peak_id)
            .await?
            .ok_or(CoreError::PeakNotFound(peak_id))?;

        if let Err(e) = self.ascent_repo.insert_ascent(user_id, peak_id, &mark).await {
            if matches!(e, CoreError::PeakAlreadyClimbed(_)) {
                metrics::record_peak_ascent("duplicate");
            }
            return Err(e);
        }
        metrics::record_peak_ascent("success");
        info!(user_id, peak_id, peak = %peak.name, "Peak marked as climbed");

        let awarded_badges = self.engine.award_threshold_badges(user_id).await?;
        let awarded_special_badges = self
            .engine
            .award_for_ascent(user_id, peak_id, Utc::now())
            .await?;

        Ok(MarkPeakOutcome {
            peak_name: peak.name,
            awarded_badges,
            awarded_special_badges,
        })
    }

    /// 用户已登顶的山峰列表
    pub async fn list_climbed_peaks(&self, user_id: i64) -> Result<Vec<ClimbedPeak>> {
        self.ascent_repo.list_climbed(user_id).await
    }
}

/// 登顶位置（可选）需在合法经纬度范围内
fn validate_position(mark: &MarkPeak) -> Result<()> {
    if let Some(lat) = mark.lat
        && !(lat.is_finite() && (-90.0..=90.0).contains(&lat))
    {
        return Err(CoreError::Validation("Invalid latitude".to_string()));
    }
    if let Some(lng) = mark.lng
        && !(lng.is_finite() && (-180.0..=180.0).contains(&lng))
    {
        return Err(CoreError::Validation("Invalid longitude".to_string()));
    }
    Ok(())
}
