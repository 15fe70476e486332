//! 用户仓储

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::traits::UserRepositoryTrait;
use crate::error::{CoreError, Result, is_unique_violation};
use crate::models::{NewUser, ProfileUpdate, UserCredentials, UserProfile};

/// 用户仓储
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建用户
    pub async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoreError::EmailTaken
            } else {
                CoreError::Database(e)
            }
        })?;

        Ok(id)
    }

    pub async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_credentials_by_id(&self, id: i64) -> Result<Option<UserCredentials>> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_profile(&self, id: i64) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, created_at, allow_location_sharing
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// 更新资料，未提供的字段保持原值
    pub async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                allow_location_sharing = COALESCE($3, allow_location_sharing)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.username.as_deref())
        .bind(update.allow_location_sharing)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除用户及全部关联数据
    ///
    /// 依赖顺序：徽章 -> 登顶记录 -> 紧急信息卡 -> 轨迹点 -> 徒步记录 -> 用户。
    /// 任一步失败时事务随 `tx` 被 drop 回滚。
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_badges WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM user_peaks WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM user_emergency WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM hike_points WHERE hike_id IN (SELECT id FROM hikes WHERE user_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM hikes WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(user_id = id, "User account deleted");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<i64> {
        self.create_user(user).await
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        self.find_credentials_by_email(email).await
    }

    async fn find_credentials_by_id(&self, id: i64) -> Result<Option<UserCredentials>> {
        self.find_credentials_by_id(id).await
    }

    async fn get_profile(&self, id: i64) -> Result<Option<UserProfile>> {
        self.get_profile(id).await
    }

    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<bool> {
        self.update_profile(id, update).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password(id, password_hash).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user(id).await
    }
}
