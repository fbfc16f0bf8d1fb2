use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::contact_entity;

/// 联系表单请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// 留言响应 (管理端)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<contact_entity::Model> for ContactResponse {
    fn from(m: contact_entity::Model) -> Self {
        ContactResponse {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
