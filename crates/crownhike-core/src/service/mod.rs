//! 服务层
//!
//! 编排仓储与徽章引擎，供 HTTP 处理器调用。
//!
//! ## 模块结构
//!
//! - `award`: 徽章发放引擎（数量阈值徽章、特殊徽章）
//! - `ascent_service`: 登顶记录
//! - `hike_service`: 徒步记录与轨迹
//! - `emergency_service`: 紧急信息卡
//! - `peak_service`: 山峰目录与路线规划

pub mod award;
pub mod ascent_service;
pub mod emergency_service;
pub mod hike_service;
pub mod peak_service;

pub use ascent_service::AscentService;
pub use award::{AwardTimeZone, BadgeEngine};
pub use emergency_service::EmergencyService;
pub use hike_service::HikeService;
pub use peak_service::PeakService;
