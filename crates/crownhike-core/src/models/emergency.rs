//! 紧急信息卡

use serde::{Deserialize, Serialize};

/// 紧急信息卡（每个用户一张，整体覆盖写入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct EmergencyCard {
    pub phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub blood_type: Option<String>,
    pub address_street: Option<String>,
    pub address_house_number: Option<String>,
    pub address_postal_code: Option<String>,
    pub address_city: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub todays_plan: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl EmergencyCard {
    /// 是否填写了任一基础安全信息（电话、联系人姓名/电话、血型）
    pub fn has_basic_safety_data(&self) -> bool {
        present(&self.phone)
            || present(&self.emergency_contact_name)
            || present(&self.emergency_contact_phone)
            || present(&self.blood_type)
    }

    /// 当日计划去除空白后是否非空
    pub fn has_todays_plan(&self) -> bool {
        self.todays_plan
            .as_deref()
            .is_some_and(|plan| !plan.trim().is_empty())
    }
}
