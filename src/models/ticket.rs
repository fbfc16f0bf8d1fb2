use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{TicketStatus, ticket_entity};

/// 订票请求 (购票表单)
/// email / id_number 按部署的表单版本二选一必填
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BookTicketRequest {
    /// 购票人姓名
    pub name: String,
    /// 购票人电话
    pub phone: String,
    /// 购票人邮箱
    pub email: Option<String>,
    /// 购票人证件号
    pub id_number: Option<String>,
}

/// 订票成功响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookTicketResponse {
    /// 票ID
    pub ticket_id: i64,
    /// 展示票号，如 LUCKY-0151
    pub ticket_number: String,
}

/// 全部票查询参数 (管理端)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TicketQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 票信息响应 (管理端)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketResponse {
    pub id: i64,
    pub draw_id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub ticket_number: String,
    pub number: i64,
    pub status: TicketStatus,
    pub picked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ticket_entity::Model> for TicketResponse {
    fn from(m: ticket_entity::Model) -> Self {
        TicketResponse {
            id: m.id,
            draw_id: m.draw_id,
            name: m.name,
            phone: m.phone,
            email: m.email,
            id_number: m.id_number,
            ticket_number: m.ticket_number,
            number: m.number,
            status: m.status,
            picked_at: m.picked_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
