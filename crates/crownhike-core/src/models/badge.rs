//! 徽章实体定义
//!
//! 徽章目录由迁移脚本写入，分为两类：
//! - 数量阈值徽章：`required_peaks` 非空，登顶不同山峰数达到阈值即发放
//! - 特殊徽章：`required_peaks` 为空，由登顶/紧急信息卡规则按编码发放

use serde::{Deserialize, Serialize};

/// 徽章定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Badge {
    pub id: i64,
    /// 业务唯一编码
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// 数量阈值（不同山峰数），特殊徽章为空
    pub required_peaks: Option<i32>,
}

/// 特殊徽章编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialBadge {
    /// 同一天登顶 3 座及以上
    ThreePeaksOneDay,
    /// 8 点前登顶
    MorningClimb,
    /// 18-21 点登顶
    SunsetClimb,
    /// 22 点后或 4 点前登顶
    NightClimb,
    /// 12、1、2 月登顶
    WinterClimb,
    /// 填写了基础安全信息
    SafetyCardFilled,
    /// 填写了当日计划
    TodaysPlanSet,
}

impl SpecialBadge {
    /// 徽章目录中的编码
    pub fn code(self) -> &'static str {
        match self {
            Self::ThreePeaksOneDay => "THREE_PEAKS_ONE_DAY",
            Self::MorningClimb => "MORNING_CLIMB",
            Self::SunsetClimb => "SUNSET_CLIMB",
            Self::NightClimb => "NIGHT_CLIMB",
            Self::WinterClimb => "WINTER_CLIMB",
            Self::SafetyCardFilled => "SAFETY_CARD_FILLED",
            Self::TodaysPlanSet => "TODAYS_PLAN_SET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_special_codes_unique() {
        let all = [
            SpecialBadge::ThreePeaksOneDay,
            SpecialBadge::MorningClimb,
            SpecialBadge::SunsetClimb,
            SpecialBadge::NightClimb,
            SpecialBadge::WinterClimb,
            SpecialBadge::SafetyCardFilled,
            SpecialBadge::TodaysPlanSet,
        ];
        let codes: HashSet<_> = all.iter().map(|b| b.code()).collect();
        assert_eq!(codes.len(), all.len());
        assert_eq!(SpecialBadge::NightClimb.code(), "NIGHT_CLIMB");
    }

    #[test]
    fn test_badge_serializes_snake_case() {
        let badge = Badge {
            id: 1,
            code: "TATRA_1".to_string(),
            name: "First Peak".to_string(),
            description: None,
            required_peaks: Some(1),
        };
        let json = serde_json::to_value(&badge).unwrap();
        assert_eq!(json["required_peaks"], 1);
        assert_eq!(json["code"], "TATRA_1");
    }
}
