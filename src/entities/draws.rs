use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 活动状态：开奖后置为 closed
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl std::fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawStatus::Active => write!(f, "active"),
            DrawStatus::Closed => write!(f, "closed"),
        }
    }
}

/// 抽奖活动实体
/// 说明:
/// - tickets_sold 与指向本期的票数保持一致，只在票创建/删除事务内更新
/// - ticket_counter 为旧版顺序发号字段，保留列但不再读取
/// - winner_ticket_id 开奖后指向中奖票
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 活动标题
    pub title: String,
    /// 奖品描述
    pub prize: String,
    /// 开奖时间
    pub draw_date: DateTime<Utc>,
    /// 票价
    pub ticket_price: i64,
    /// 总票数上限 (NULL = 未设置)
    pub total_tickets: Option<i64>,
    /// 已售票数 (非负，删除时下限为 0)
    pub tickets_sold: i64,
    /// 旧版顺序计数器 (保留，未使用)
    pub ticket_counter: i64,
    /// 活动状态
    pub status: DrawStatus,
    /// 中奖票ID
    pub winner_ticket_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
