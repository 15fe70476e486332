//! 紧急信息卡仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::EmergencyRepositoryTrait;
use crate::error::Result;
use crate::models::EmergencyCard;

/// 紧急信息卡仓储
pub struct EmergencyRepository {
    pool: PgPool,
}

impl EmergencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_card(&self, user_id: i64) -> Result<Option<EmergencyCard>> {
        let card = sqlx::query_as::<_, EmergencyCard>(
            r#"
            SELECT phone, emergency_contact_name, emergency_contact_phone,
                   blood_type, address_street, address_house_number,
                   address_postal_code, address_city,
                   allergies, medications, todays_plan
            FROM user_emergency
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// 整卡覆盖写入，未提供的字段写为 NULL
    pub async fn upsert_card(&self, user_id: i64, card: &EmergencyCard) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_emergency
                (user_id, phone, emergency_contact_name, emergency_contact_phone,
                 blood_type, address_street, address_house_number,
                 address_postal_code, address_city,
                 allergies, medications, todays_plan, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                phone = EXCLUDED.phone,
                emergency_contact_name = EXCLUDED.emergency_contact_name,
                emergency_contact_phone = EXCLUDED.emergency_contact_phone,
                blood_type = EXCLUDED.blood_type,
                address_street = EXCLUDED.address_street,
                address_house_number = EXCLUDED.address_house_number,
                address_postal_code = EXCLUDED.address_postal_code,
                address_city = EXCLUDED.address_city,
                allergies = EXCLUDED.allergies,
                medications = EXCLUDED.medications,
                todays_plan = EXCLUDED.todays_plan,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(card.phone.as_deref())
        .bind(card.emergency_contact_name.as_deref())
        .bind(card.emergency_contact_phone.as_deref())
        .bind(card.blood_type.as_deref())
        .bind(card.address_street.as_deref())
        .bind(card.address_house_number.as_deref())
        .bind(card.address_postal_code.as_deref())
        .bind(card.address_city.as_deref())
        .bind(card.allergies.as_deref())
        .bind(card.medications.as_deref())
        .bind(card.todays_plan.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl EmergencyRepositoryTrait for EmergencyRepository {
    async fn get_card(&self, user_id: i64) -> Result<Option<EmergencyCard>> {
        self.get_card(user_id).await
    }

    async fn upsert_card(&self, user_id: i64, card: &EmergencyCard) -> Result<()> {
        self.upsert_card(user_id, card).await
    }
}
