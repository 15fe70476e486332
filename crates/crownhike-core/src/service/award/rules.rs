//! 徽章判定规则
//!
//! 纯函数，不访问数据库：输入为统计结果与本地时间，输出为应发放的徽章

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::models::{Badge, EmergencyCard, SpecialBadge};

/// 同一天登顶数达到此值获得 THREE_PEAKS_ONE_DAY
pub const PEAKS_PER_DAY_THRESHOLD: i64 = 3;

/// 满足阈值且尚未持有的数量阈值徽章
pub fn qualifying_threshold_badges(
    catalogue: &[Badge],
    distinct_peaks: i64,
    held: &HashSet<i64>,
) -> Vec<Badge> {
    catalogue
        .iter()
        .filter(|badge| {
            badge
                .required_peaks
                .is_some_and(|required| i64::from(required) <= distinct_peaks)
        })
        .filter(|badge| !held.contains(&badge.id))
        .cloned()
        .collect()
}

/// 登顶触发的特殊徽章
///
/// 各条件相互独立，按固定顺序输出：
/// 当天 3 峰、早晨（<8）、日落（18-21）、夜间（>=22 或 <4）、冬季（12/1/2 月）
pub fn ascent_badges(ascents_today: i64, latest_local: Option<NaiveDateTime>) -> Vec<SpecialBadge> {
    let mut badges = Vec::new();

    if ascents_today >= PEAKS_PER_DAY_THRESHOLD {
        badges.push(SpecialBadge::ThreePeaksOneDay);
    }

    if let Some(local) = latest_local {
        let hour = local.hour();
        if hour < 8 {
            badges.push(SpecialBadge::MorningClimb);
        }
        if (18..=21).contains(&hour) {
            badges.push(SpecialBadge::SunsetClimb);
        }
        if hour >= 22 || hour < 4 {
            badges.push(SpecialBadge::NightClimb);
        }
        if matches!(local.month(), 12 | 1 | 2) {
            badges.push(SpecialBadge::WinterClimb);
        }
    }

    badges
}

/// 紧急信息卡触发的特殊徽章
pub fn emergency_badges(card: &EmergencyCard) -> Vec<SpecialBadge> {
    let mut badges = Vec::new();
    if card.has_basic_safety_data() {
        badges.push(SpecialBadge::SafetyCardFilled);
    }
    if card.has_todays_plan() {
        badges.push(SpecialBadge::TodaysPlanSet);
    }
    badges
}
