//! 领域模型
//!
//! 包含山峰、用户、登顶记录、徒步轨迹、徽章与紧急信息卡的实体定义

pub mod ascent;
pub mod badge;
pub mod emergency;
pub mod enums;
pub mod hike;
pub mod peak;
pub mod user;

pub use ascent::{ClimbedPeak, MarkPeak, MarkPeakOutcome};
pub use badge::{Badge, SpecialBadge};
pub use emergency::EmergencyCard;
pub use enums::{Difficulty, PeakSort, SortDirection, TrailColor};
pub use hike::{HikeDetail, HikeSummary, NewHike, RawPoint, TrackPoint, sanitize_track};
pub use peak::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Peak, PeakQuery};
pub use user::{NewUser, ProfileUpdate, UserCredentials, UserProfile};
