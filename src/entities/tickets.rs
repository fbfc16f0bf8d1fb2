use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 票状态：开奖时中奖票置为 winner
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[sea_orm(string_value = "booked")]
    Booked,
    #[sea_orm(string_value = "winner")]
    Winner,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Booked => write!(f, "booked"),
            TicketStatus::Winner => write!(f, "winner"),
        }
    }
}

/// 票实体
/// 说明:
/// - id 与票号相互独立，删票凭 id
/// - number 为占用的原始整数，ticket_number 为派生展示串 (前缀 + 4位补零)
/// - email / id_number 二选一，取决于部署的表单版本
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 所属活动ID
    pub draw_id: i64,
    /// 购票人姓名
    pub name: String,
    /// 购票人电话
    pub phone: String,
    /// 购票人邮箱 (表单邮箱版)
    pub email: Option<String>,
    /// 购票人证件号 (表单证件版)
    pub id_number: Option<String>,
    /// 展示票号，如 LUCKY-0151
    #[sea_orm(unique)]
    pub ticket_number: String,
    /// 占用的原始号码
    pub number: i64,
    /// 票状态
    pub status: TicketStatus,
    /// 中奖时间
    pub picked_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
