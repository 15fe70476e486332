//! 山峰目录实体

use serde::{Deserialize, Serialize};

use super::enums::{Difficulty, PeakSort, SortDirection, TrailColor};

/// 列表默认每页条数
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// 列表每页条数上限
pub const MAX_PAGE_LIMIT: i64 = 200;

/// 山峰
///
/// 对外字段名沿用 `region` / `elevation_m`，对应表中的 mountain_range / height_m
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Peak {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub elevation_m: i32,
    pub difficulty: Difficulty,
    pub main_trail_color: TrailColor,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub description: Option<String>,
}

impl Peak {
    /// 山峰坐标（经纬度均存在时）
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// 山峰列表查询条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakQuery {
    pub difficulty: Option<Difficulty>,
    pub main_trail_color: Option<TrailColor>,
    pub mountain_range: Option<String>,
    /// 名称子串
    pub search: Option<String>,
    pub sort: PeakSort,
    pub dir: Option<SortDirection>,
    pub page: i64,
    pub limit: i64,
}

impl PeakQuery {
    /// 规整分页参数：page 非正数时为 1；limit 非正数时为默认值，超过上限时截断
    pub fn normalized(mut self) -> Self {
        if self.page <= 0 {
            self.page = 1;
        }
        if self.limit <= 0 {
            self.limit = DEFAULT_PAGE_LIMIT;
        }
        self.limit = self.limit.min(MAX_PAGE_LIMIT);
        self
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit
    }

    /// 实际排序方向
    pub fn direction(&self) -> SortDirection {
        self.dir.unwrap_or_else(|| self.sort.default_direction())
    }
}
