use crate::entities::{
    DrawStatus, TicketStatus, draw_entity as draws, ticket_entity as tickets,
};
use crate::error::{AppError, AppResult};
use crate::models::{CreateDrawRequest, DrawResponse};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, Set, TransactionTrait, UpdateResult,
};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 活动列表（新建在前）
    pub async fn list_draws(&self) -> AppResult<Vec<DrawResponse>> {
        let list = draws::Entity::find()
            .order_by(draws::Column::CreatedAt, Order::Desc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 单个活动
    pub async fn get_draw(&self, draw_id: i64) -> AppResult<DrawResponse> {
        let draw = draws::Entity::find_by_id(draw_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::DrawNotFound)?;

        Ok(draw.into())
    }

    /// 创建活动（管理端）：初始 active，计数归零
    pub async fn create_draw(&self, request: CreateDrawRequest) -> AppResult<DrawResponse> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }
        if request.ticket_price < 0 {
            return Err(AppError::ValidationError(
                "Ticket price cannot be negative".to_string(),
            ));
        }
        if let Some(total) = request.total_tickets
            && total <= 0
        {
            return Err(AppError::ValidationError(
                "Total tickets must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let draw = draws::ActiveModel {
            title: Set(request.title.trim().to_string()),
            prize: Set(request.prize.trim().to_string()),
            draw_date: Set(request.draw_date),
            ticket_price: Set(request.ticket_price),
            total_tickets: Set(request.total_tickets),
            tickets_sold: Set(0),
            ticket_counter: Set(0),
            status: Set(DrawStatus::Active),
            winner_ticket_id: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created draw {} ({})", draw.id, draw.title);
        Ok(draw.into())
    }

    /// 整体删除活动（管理端）
    ///
    /// 批量写：先删该期全部票，再删活动本身，一并提交，途中无读取。
    /// 已占用的号码保留在占用表中，不随活动删除释放。
    pub async fn delete_draw(&self, draw_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let deleted_tickets = tickets::Entity::delete_many()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .exec(&txn)
            .await?;

        let deleted = draws::Entity::delete_by_id(draw_id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::DrawNotFound);
        }

        txn.commit().await?;

        log::info!(
            "Deleted draw {draw_id} with {} tickets",
            deleted_tickets.rows_affected
        );
        Ok(())
    }

    /// 开奖（管理端）
    ///
    /// 单事务：票置为 winner、活动置为 closed 并记录中奖票。
    /// 关闭时守护活动仍为 active，并发开奖只有一个能成功。
    pub async fn mark_winner(&self, draw_id: i64, ticket_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let draw = draws::Entity::find_by_id(draw_id)
            .one(&txn)
            .await?
            .ok_or(AppError::DrawNotFound)?;

        if draw.status != DrawStatus::Active {
            return Err(AppError::ValidationError(
                "Draw is already closed".to_string(),
            ));
        }

        let ticket = tickets::Entity::find_by_id(ticket_id)
            .one(&txn)
            .await?
            .ok_or(AppError::TicketNotFound)?;

        if ticket.draw_id != draw.id {
            return Err(AppError::ValidationError(
                "Ticket does not belong to this draw".to_string(),
            ));
        }

        let winner_id = ticket.id;
        let mut ticket = ticket.into_active_model();
        ticket.status = Set(TicketStatus::Winner);
        ticket.picked_at = Set(Some(Utc::now()));
        ticket.update(&txn).await?;

        let update: UpdateResult = draws::Entity::update_many()
            .col_expr(draws::Column::Status, Expr::value(DrawStatus::Closed))
            .col_expr(draws::Column::WinnerTicketId, Expr::value(Some(winner_id)))
            .col_expr(draws::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(draws::Column::Id.eq(draw.id))
            .filter(draws::Column::Status.eq(DrawStatus::Active))
            .exec(&txn)
            .await?;

        if update.rows_affected != 1 {
            txn.rollback().await?;
            return Err(AppError::ValidationError(
                "Draw is already closed".to_string(),
            ));
        }

        txn.commit().await?;

        log::info!("Marked ticket {winner_id} as winner of draw {draw_id}");
        Ok(())
    }
}
