use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 号码占用实体
/// 说明:
/// - number 为主键且不自增，行存在即代表号码已被占用
/// - 并发占用同一号码时主键冲突，分配事务据此判定冲突并重试
/// - 号池为全局共享，不按活动隔离
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_numbers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: i64,
    /// 占用号码的活动ID
    pub draw_id: i64,
    /// 占用时间
    pub reserved_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
