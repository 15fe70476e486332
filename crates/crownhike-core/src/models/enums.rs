//! 枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化

use serde::{Deserialize, Serialize};

/// 山峰难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Expert,
}

/// 主路线标记颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrailColor {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
    Mixed,
}

/// 山峰列表排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakSort {
    Name,
    #[default]
    Height,
    Difficulty,
}

impl PeakSort {
    /// 对应的数据库列名（固定白名单，可直接拼接进 SQL）
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Height => "height_m",
            Self::Difficulty => "difficulty",
        }
    }

    /// 未指定方向时的默认排序：高度默认降序，其余升序
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Height => SortDirection::Desc,
            Self::Name | Self::Difficulty => SortDirection::Asc,
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
