//! 数据库仓储层
//!
//! 提供所有实体的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 唯一约束冲突在仓储层转换为领域错误（重复登顶、邮箱已注册）
//! - 多语句写入（徒步轨迹、删除账号）在仓储内部使用事务
//! - 定义 trait 接口以支持 mock 测试

mod ascent_repo;
mod badge_repo;
mod emergency_repo;
mod hike_repo;
mod peak_repo;
mod traits;
mod user_repo;

pub use ascent_repo::AscentRepository;
pub use badge_repo::BadgeRepository;
pub use emergency_repo::EmergencyRepository;
pub use hike_repo::HikeRepository;
pub use peak_repo::PeakRepository;
pub use traits::*;
pub use user_repo::UserRepository;
