use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::admin_user_entity;

/// 管理端登录请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录/刷新成功响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// access token 有效期 (秒)
    pub expires_in: i64,
    pub user: AdminUserResponse,
}

/// 管理端账号信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminUserResponse {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<admin_user_entity::Model> for AdminUserResponse {
    fn from(m: admin_user_entity::Model) -> Self {
        AdminUserResponse {
            id: m.id,
            email: m.email,
            is_admin: m.is_admin,
        }
    }
}
