//! 徽章发放引擎
//!
//! 判断用户新满足了哪些徽章，并且每个徽章只发放一次：
//!
//! - **数量阈值徽章**：每次都从登顶记录重新统计不同山峰数，没有缓存计数器
//! - **特殊徽章**：由登顶或紧急信息卡规则给出编码，逐个按编码发放
//!
//! 发放依赖 (user_id, badge_id) 唯一约束做"不存在则插入"，并发触发时由数据库吸收重复，
//! 返回值只包含本次真正写入的徽章（增量）。已发放的徽章不会被撤销。
//!
//! 发放过程中的持久化错误会中止本次发放并向上返回，但不会回滚触发它的登顶或信息卡写入。

mod clock;
pub mod rules;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crownhike_shared::observability::metrics;

use crate::error::{CoreError, Result};
use crate::models::{Badge, EmergencyCard, SpecialBadge};
use crate::repository::{AscentRepositoryTrait, BadgeRepositoryTrait};

pub use clock::AwardTimeZone;

/// 徽章发放引擎
pub struct BadgeEngine<BR, AR>
where
    BR: BadgeRepositoryTrait,
    AR: AscentRepositoryTrait,
{
    badge_repo: Arc<BR>,
    ascent_repo: Arc<AR>,
    time_zone: AwardTimeZone,
}

impl<BR, AR> BadgeEngine<BR, AR>
where
    BR: BadgeRepositoryTrait,
    AR: AscentRepositoryTrait,
{
    pub fn new(badge_repo: Arc<BR>, ascent_repo: Arc<AR>, time_zone: AwardTimeZone) -> Self {
        Self {
            badge_repo,
            ascent_repo,
            time_zone,
        }
    }

    pub fn time_zone(&self) -> AwardTimeZone {
        self.time_zone
    }

    /// 发放数量阈值徽章
    ///
    /// 统计不同山峰数 -> 选出阈值已达到且未持有的徽章 -> 批量写入，
    /// 返回写入语句报告为新增的徽章。无新登顶时重复调用返回空列表。
    #[instrument(skip(self))]
    pub async fn award_threshold_badges(&self, user_id: i64) -> Result<Vec<Badge>> {
        let distinct_peaks = self.ascent_repo.count_distinct_peaks(user_id).await?;
        if distinct_peaks == 0 {
            return Ok(vec![]);
        }

        let catalogue = self.badge_repo.list_threshold_badges().await?;
        let held: HashSet<i64> = self
            .badge_repo
            .held_badge_ids(user_id)
            .await?
            .into_iter()
            .collect();

        let candidates = rules::qualifying_threshold_badges(&catalogue, distinct_peaks, &held);
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let candidate_ids: Vec<i64> = candidates.iter().map(|b| b.id).collect();
        let inserted: HashSet<i64> = self
            .badge_repo
            .insert_user_badges(user_id, &candidate_ids)
            .await?
            .into_iter()
            .collect();

        let awarded: Vec<Badge> = candidates
            .into_iter()
            .filter(|badge| inserted.contains(&badge.id))
            .collect();

        for badge in &awarded {
            metrics::record_badge_award(&badge.code, "threshold");
        }
        if !awarded.is_empty() {
            info!(
                user_id,
                distinct_peaks,
                codes = ?awarded.iter().map(|b| b.code.as_str()).collect::<Vec<_>>(),
                "Threshold badges awarded"
            );
        }

        Ok(awarded)
    }

    /// 按编码发放单个徽章
    ///
    /// 编码不存在时返回 `CoreError::UnknownBadgeCode`；
    /// 返回 true 表示本次新写入，已持有（含并发写入落败）返回 false
    #[instrument(skip(self))]
    pub async fn award_by_code(&self, user_id: i64, code: &str) -> Result<bool> {
        let badge = self
            .badge_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| CoreError::UnknownBadgeCode(code.to_string()))?;

        let inserted = self.badge_repo.insert_user_badge(user_id, badge.id).await?;
        if inserted {
            metrics::record_badge_award(&badge.code, "special");
            info!(user_id, code = %badge.code, "Special badge awarded");
        }

        Ok(inserted)
    }

    /// 依次发放特殊徽章，返回新获得的编码
    ///
    /// 目录中缺失的编码记录 warn 后跳过，其余错误直接返回
    pub async fn award_special(
        &self,
        user_id: i64,
        badges: &[SpecialBadge],
    ) -> Result<Vec<String>> {
        let mut awarded = Vec::new();

        for badge in badges {
            match self.award_by_code(user_id, badge.code()).await {
                Ok(true) => awarded.push(badge.code().to_string()),
                Ok(false) => {}
                Err(CoreError::UnknownBadgeCode(code)) => {
                    warn!(user_id, code = %code, "徽章目录中不存在该编码，跳过发放");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(awarded)
    }

    /// 登顶后的特殊徽章判定
    ///
    /// "当天"按 `now` 所在的本地日期计算；时段与月份按该山峰最近一次登顶时间计算
    #[instrument(skip(self))]
    pub async fn award_for_ascent(
        &self,
        user_id: i64,
        peak_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let (day_start, day_end) = self.time_zone.day_bounds(now);
        let ascents_today = self
            .ascent_repo
            .count_ascents_between(user_id, day_start, day_end)
            .await?;

        let latest_local = self
            .ascent_repo
            .latest_ascent_at(user_id, peak_id)
            .await?
            .map(|t| self.time_zone.local_naive(t));

        let candidates = rules::ascent_badges(ascents_today, latest_local);
        self.award_special(user_id, &candidates).await
    }

    /// 紧急信息卡保存后的特殊徽章判定
    #[instrument(skip(self, card))]
    pub async fn award_for_emergency_card(
        &self,
        user_id: i64,
        card: &EmergencyCard,
    ) -> Result<Vec<String>> {
        let candidates = rules::emergency_badges(card);
        self.award_special(user_id, &candidates).await
    }
}
