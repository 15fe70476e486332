//! 紧急信息卡服务

use std::sync::Arc;

use tracing::instrument;

use super::award::BadgeEngine;
use crate::error::Result;
use crate::models::EmergencyCard;
use crate::repository::{AscentRepositoryTrait, BadgeRepositoryTrait, EmergencyRepositoryTrait};

/// 紧急信息卡服务
pub struct EmergencyService<ER, BR, AR>
where
    ER: EmergencyRepositoryTrait,
    BR: BadgeRepositoryTrait,
    AR: AscentRepositoryTrait,
{
    emergency_repo: Arc<ER>,
    engine: Arc<BadgeEngine<BR, AR>>,
}

impl<ER, BR, AR> EmergencyService<ER, BR, AR>
where
    ER: EmergencyRepositoryTrait,
    BR: BadgeRepositoryTrait,
    AR: AscentRepositoryTrait,
{
    pub fn new(emergency_repo: Arc<ER>, engine: Arc<BadgeEngine<BR, AR>>) -> Self {
        Self {
            emergency_repo,
            engine,
        }
    }

    /// 尚未保存过时返回全空的信息卡
    pub async fn get_card(&self, user_id: i64) -> Result<EmergencyCard> {
        Ok(self
            .emergency_repo
            .get_card(user_id)
            .await?
            .unwrap_or_default())
    }

    /// 整体覆盖保存信息卡，然后判定信息卡相关的特殊徽章
    #[instrument(skip(self, card))]
    pub async fn save_card(&self, user_id: i64, card: EmergencyCard) -> Result<Vec<String>> {
        self.emergency_repo.upsert_card(user_id, &card).await?;
        self.engine.award_for_emergency_card(user_id, &card).await
    }
}
