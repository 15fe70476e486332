//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crownhike_shared::config::AuthConfig;

use crate::error::ApiError;

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in_secs: config.jwt_expires_secs,
            issuer: config.jwt_issuer.clone(),
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// 用户 ID
    pub sub: i64,
    pub email: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 生成 JWT Token，返回 Token 与过期时间戳
    pub fn generate_token(&self, user_id: i64, email: &str) -> Result<(String, i64), ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("JWT 生成失败: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// 签名错误、过期、签发者不符都返回 `ApiError::Forbidden`
    pub fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token 验证失败");
            ApiError::Forbidden("Invalid or expired token".to_string())
        })?;

        Ok(token_data.claims)
    }

    /// 获取 Token 过期时间（秒）
    pub fn expires_in_secs(&self) -> i64 {
        self.config.expires_in_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expires_in_secs: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expires_in_secs,
            issuer: "crownhike-api".to_string(),
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let manager = JwtManager::new(config("secret", 3600));

        let (token, exp) = manager.generate_token(42, "jan@example.com").unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "jan@example.com");
        assert_eq!(claims.iss, "crownhike-api");
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_invalid_token() {
        let manager = JwtManager::new(config("secret", 3600));
        let err = manager.verify_token("invalid.token.here").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let issuer = JwtManager::new(config("secret-a", 3600));
        let verifier = JwtManager::new(config("secret-b", 3600));

        let (token, _) = issuer.generate_token(1, "a@example.com").unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // 超过默认 60 秒的校验宽限
        let manager = JwtManager::new(config("secret", -3600));
        let (token, _) = manager.generate_token(1, "a@example.com").unwrap();
        assert!(matches!(
            manager.verify_token(&token).unwrap_err(),
            ApiError::Forbidden(_)
        ));
    }
}
