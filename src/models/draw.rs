use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{DrawStatus, draw_entity};

/// 创建活动请求 (管理端)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateDrawRequest {
    /// 活动标题
    pub title: String,
    /// 奖品描述
    pub prize: String,
    /// 开奖时间
    pub draw_date: DateTime<Utc>,
    /// 票价
    #[serde(default)]
    pub ticket_price: i64,
    /// 总票数上限 (可不设)
    pub total_tickets: Option<i64>,
}

/// 指定中奖票请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkWinnerRequest {
    /// 中奖票ID
    pub ticket_id: i64,
}

/// 活动信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub id: i64,
    pub title: String,
    pub prize: String,
    pub draw_date: DateTime<Utc>,
    pub ticket_price: i64,
    pub total_tickets: Option<i64>,
    /// 已售票数
    pub tickets_sold: i64,
    pub status: DrawStatus,
    pub winner_ticket_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<draw_entity::Model> for DrawResponse {
    fn from(m: draw_entity::Model) -> Self {
        DrawResponse {
            id: m.id,
            title: m.title,
            prize: m.prize,
            draw_date: m.draw_date,
            ticket_price: m.ticket_price,
            total_tickets: m.total_tickets,
            tickets_sold: m.tickets_sold,
            status: m.status,
            winner_ticket_id: m.winner_ticket_id,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
