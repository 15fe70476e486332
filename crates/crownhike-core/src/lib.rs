//! CrownHike 领域层
//!
//! 徒步应用的核心业务：山峰目录、登顶记录、徒步轨迹、紧急信息卡以及徽章发放。
//!
//! ## 核心功能
//!
//! - **徽章发放**：登顶后按不同山峰数发放阈值徽章，并按时段、月份、当日登顶数发放特殊徽章；
//!   保存紧急信息卡后发放安全类徽章。每个徽章对每个用户最多发放一次
//! - **登顶记录**：同一用户对同一山峰只能登记一次
//! - **徒步轨迹**：记录与轨迹点在同一事务中写入
//! - **路线规划**：通过外部路线服务计算到山峰的徒步路线
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `routing`: 路线规划
//! - `service`: 业务服务层

pub mod error;
pub mod models;
pub mod repository;
pub mod routing;
pub mod service;

pub use error::{CoreError, Result};
pub use models::*;
pub use repository::{
    AscentRepository, BadgeRepository, EmergencyRepository, HikeRepository, PeakRepository,
    UserRepository,
};
pub use routing::{GeoPoint, OpenRouteServicePlanner, PlannedRoute, RoutePlanner};
pub use service::{
    AscentService, AwardTimeZone, BadgeEngine, EmergencyService, HikeService, PeakService,
};
