//! 徽章判定使用的时区
//!
//! "当天"、"早晨"、"冬季"等条件都按判定时区的本地时间计算。

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 判定时区
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AwardTimeZone {
    /// 服务器本地时区
    #[default]
    System,
    /// 固定偏移
    Fixed(FixedOffset),
}

impl AwardTimeZone {
    /// 由配置的固定偏移构造，None 表示服务器本地时区
    pub fn from_offset(offset: Option<FixedOffset>) -> Self {
        offset.map_or(Self::System, Self::Fixed)
    }

    /// 转换为本地时间
    pub fn local_naive(&self, t: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::System => t.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => t.with_timezone(offset).naive_local(),
        }
    }

    /// t 所在本地日期的 [00:00, 次日 00:00) 区间（UTC）
    pub fn day_bounds(&self, t: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::System => day_bounds_in(&Local, t),
            Self::Fixed(offset) => day_bounds_in(offset, t),
        }
    }
}

fn day_bounds_in<Tz: TimeZone>(tz: &Tz, t: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = t.with_timezone(tz).date_naive();
    let next = date.succ_opt().unwrap_or(date);
    (local_midnight(tz, date), local_midnight(tz, next))
}

/// 本地零点对应的 UTC 时间
///
/// 零点落在夏令时跳变间隙时取其后一小时；仍无法表示时按 UTC 零点处理
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_fixed_offset_local_time() {
        let tz = AwardTimeZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        let local = tz.local_naive(utc(2024, 6, 1, 23, 30));
        assert_eq!(local.hour(), 1);
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn test_fixed_offset_day_bounds() {
        let tz = AwardTimeZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        // 本地 2024-06-02 01:30
        let (start, end) = tz.day_bounds(utc(2024, 6, 1, 23, 30));
        assert_eq!(start, utc(2024, 6, 1, 22, 0));
        assert_eq!(end, utc(2024, 6, 2, 22, 0));
    }

    #[test]
    fn test_negative_offset_day_bounds() {
        let tz = AwardTimeZone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());
        let (start, end) = tz.day_bounds(utc(2024, 1, 10, 3, 0));
        // 本地 2024-01-09 22:00
        assert_eq!(start, utc(2024, 1, 9, 5, 0));
        assert_eq!(end, utc(2024, 1, 10, 5, 0));
    }

    #[test]
    fn test_system_zone_bounds_contain_instant() {
        let now = Utc::now();
        let (start, end) = AwardTimeZone::System.day_bounds(now);
        assert!(start <= now && now < end);
    }

    #[test]
    fn test_from_offset() {
        assert_eq!(AwardTimeZone::from_offset(None), AwardTimeZone::System);
        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            AwardTimeZone::from_offset(Some(offset)),
            AwardTimeZone::Fixed(offset)
        );
    }
}
