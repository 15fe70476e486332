//! 密码处理
//!
//! bcrypt 计算成本取自 `[auth] bcrypt_cost`，哈希与校验在阻塞线程池中执行，
//! 不占用异步工作线程

use bcrypt::{hash, verify};
use tokio::task;

use crownhike_shared::config::AuthConfig;

use crate::error::ApiError;

/// 账号密码哈希器
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl From<&AuthConfig> for PasswordHasher {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 对密码进行哈希处理
    pub async fn hash(&self, password: &str) -> Result<String, ApiError> {
        let cost = self.cost;
        let password = password.to_owned();
        task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ApiError::Internal(format!("密码哈希任务失败: {}", e)))?
            .map_err(|e| ApiError::Internal(format!("密码哈希失败: {}", e)))
    }

    /// 验证密码
    ///
    /// 存储的哈希格式错误视为内部错误，而不是密码不匹配
    pub async fn verify(&self, password: &str, hashed: &str) -> Result<bool, ApiError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| ApiError::Internal(format!("密码验证任务失败: {}", e)))?
            .map_err(|e| ApiError::Internal(format!("密码验证失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crownhike_shared::test_utils::test_auth_config;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::from(&test_auth_config());
        let hashed = hasher.hash("tatry_2499").await.unwrap();

        assert_ne!(hashed, "tatry_2499");
        assert!(hasher.verify("tatry_2499", &hashed).await.unwrap());
        assert!(!hasher.verify("wrong_password", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_uses_configured_cost() {
        let hashed = PasswordHasher::new(5).hash("rysy").await.unwrap();
        assert!(hashed.starts_with("$2b$05$"), "{hashed}");
    }

    #[tokio::test]
    async fn test_cost_out_of_range_is_error() {
        let err = PasswordHasher::new(3).hash("rysy").await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        let hasher = PasswordHasher::new(4);
        assert!(hasher.verify("x", "not-a-bcrypt-hash").await.is_err());
    }
}
