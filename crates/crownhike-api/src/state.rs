//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crownhike_core::{
    AscentRepository, AscentService, AwardTimeZone, BadgeEngine, BadgeRepository,
    EmergencyRepository, EmergencyService, HikeRepository, HikeService, PeakRepository,
    PeakService, RoutePlanner, UserRepository,
};
use crownhike_shared::config::{AuthConfig, AwardConfig};

use crate::auth::{JwtConfig, JwtManager, PasswordHasher};

pub type Engine = BadgeEngine<BadgeRepository, AscentRepository>;
pub type Ascents = AscentService<PeakRepository, AscentRepository, BadgeRepository>;
pub type Hikes = HikeService<PeakRepository, HikeRepository>;
pub type Emergency = EmergencyService<EmergencyRepository, BadgeRepository, AscentRepository>;
pub type Peaks = PeakService<PeakRepository>;

/// Axum 应用共享状态
///
/// 连接池由调用方创建后注入，仓储与服务共享同一个池
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    pub jwt_manager: Arc<JwtManager>,
    pub password_hasher: PasswordHasher,
    pub user_repo: Arc<UserRepository>,
    pub badge_repo: Arc<BadgeRepository>,
    pub badge_engine: Arc<Engine>,
    pub peak_service: Arc<Peaks>,
    pub ascent_service: Arc<Ascents>,
    pub hike_service: Arc<Hikes>,
    pub emergency_service: Arc<Emergency>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        pool: PgPool,
        auth: &AuthConfig,
        awards: &AwardConfig,
        planner: Arc<dyn RoutePlanner>,
    ) -> Self {
        let peak_repo = Arc::new(PeakRepository::new(pool.clone()));
        let ascent_repo = Arc::new(AscentRepository::new(pool.clone()));
        let badge_repo = Arc::new(BadgeRepository::new(pool.clone()));
        let hike_repo = Arc::new(HikeRepository::new(pool.clone()));
        let emergency_repo = Arc::new(EmergencyRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));

        let badge_engine = Arc::new(BadgeEngine::new(
            badge_repo.clone(),
            ascent_repo.clone(),
            AwardTimeZone::from_offset(awards.fixed_offset()),
        ));

        Self {
            jwt_manager: Arc::new(JwtManager::new(JwtConfig::from(auth))),
            password_hasher: PasswordHasher::from(auth),
            peak_service: Arc::new(PeakService::new(peak_repo.clone(), planner)),
            ascent_service: Arc::new(AscentService::new(
                peak_repo.clone(),
                ascent_repo,
                badge_engine.clone(),
            )),
            hike_service: Arc::new(HikeService::new(peak_repo, hike_repo)),
            emergency_service: Arc::new(EmergencyService::new(
                emergency_repo,
                badge_engine.clone(),
            )),
            badge_engine,
            badge_repo,
            user_repo,
            pool,
        }
    }
}
