//! 用户实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户（含密码哈希，仅供认证使用，不直接序列化给客户端）
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub allow_location_sharing: bool,
}

/// 新用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 资料更新（None 表示不修改）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub allow_location_sharing: Option<bool>,
}

impl ProfileUpdate {
    /// 规整：用户名去除首尾空白，空用户名视为未提供
    pub fn normalized(self) -> Self {
        Self {
            username: self
                .username
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            allow_location_sharing: self.allow_location_sharing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.allow_location_sharing.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_normalization() {
        let update = ProfileUpdate {
            username: Some("   ".to_string()),
            allow_location_sharing: None,
        }
        .normalized();
        assert!(update.is_empty());

        let update = ProfileUpdate {
            username: Some("  Jan ".to_string()),
            allow_location_sharing: Some(true),
        }
        .normalized();
        assert_eq!(update.username.as_deref(), Some("Jan"));
        assert!(!update.is_empty());
    }
}
