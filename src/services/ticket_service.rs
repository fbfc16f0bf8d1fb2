use crate::config::{IdentityField, TicketConfig};
use crate::entities::{
    TicketStatus, draw_entity as draws, ticket_entity as tickets, ticket_number_entity as numbers,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BookTicketRequest, BookTicketResponse, PaginatedResponse, PaginationParams, TicketQuery,
    TicketResponse,
};
use crate::utils::{format_ticket_number, tickets_to_csv, validate_phone};
use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
    UpdateResult,
};
use std::collections::HashSet;

/// 单次分配事务的失败分类：
/// Conflict 代表与并发事务撞车（号码占用冲突 / 计数守护更新落空），整体重试安全；
/// Fatal 直接上抛，不重试
enum AttemptError {
    Conflict,
    Fatal(AppError),
}

fn attempt_err(e: DbErr) -> AttemptError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AttemptError::Conflict,
        _ => AttemptError::Fatal(AppError::DatabaseError(e)),
    }
}

#[derive(Clone)]
pub struct TicketService {
    pool: DatabaseConnection,
    config: TicketConfig,
}

impl TicketService {
    pub fn new(pool: DatabaseConnection, config: TicketConfig) -> Self {
        Self { pool, config }
    }

    /// 订票 (号码分配协议)
    ///
    /// 逻辑:
    /// 1. 校验购票人字段（协议外，不进事务）
    /// 2. 事务内读取活动，随机探测空闲号码，探测全部撞车则顺序扫描
    /// 3. 占用号码、写票、按读到的值守护递增 tickets_sold，一并提交
    /// 4. 任一冲突回滚整个事务并从头重试，预算用尽返回 ContentionExceeded
    pub async fn book_ticket(
        &self,
        draw_id: i64,
        request: &BookTicketRequest,
    ) -> AppResult<BookTicketResponse> {
        self.validate_booking(request)?;

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.try_allocate(draw_id, request).await {
                Ok(response) => {
                    log::info!(
                        "Booked ticket {} ({}) on draw {}",
                        response.ticket_id,
                        response.ticket_number,
                        draw_id
                    );
                    return Ok(response);
                }
                Err(AttemptError::Conflict) if attempts < self.config.max_attempts => {
                    log::warn!(
                        "Allocation conflict on draw {draw_id}, retrying (attempt {attempts})"
                    );
                    continue;
                }
                Err(AttemptError::Conflict) => return Err(AppError::ContentionExceeded),
                Err(AttemptError::Fatal(e)) => return Err(e),
            }
        }
    }

    /// 删票 (补偿删除协议)
    ///
    /// 同一事务内：删票、释放号码、守护递减 tickets_sold (下限 0)。
    /// 活动可能已被整体删除，此时跳过计数更新。
    /// 冲突不在此处重试，直接上抛给调用方（管理工具自行决定是否再试）。
    pub async fn delete_ticket(&self, ticket_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let ticket = tickets::Entity::find_by_id(ticket_id)
            .one(&txn)
            .await?
            .ok_or(AppError::TicketNotFound)?;

        let draw = draws::Entity::find_by_id(ticket.draw_id).one(&txn).await?;

        tickets::Entity::delete_by_id(ticket.id).exec(&txn).await?;
        numbers::Entity::delete_by_id(ticket.number).exec(&txn).await?;

        if let Some(draw) = draw {
            let next = (draw.tickets_sold - 1).max(0);
            let update: UpdateResult = draws::Entity::update_many()
                .col_expr(draws::Column::TicketsSold, Expr::value(next))
                .col_expr(draws::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(draws::Column::Id.eq(draw.id))
                .filter(draws::Column::TicketsSold.eq(draw.tickets_sold))
                .exec(&txn)
                .await?;

            if update.rows_affected != 1 {
                txn.rollback().await?;
                return Err(AppError::ContentionExceeded);
            }
        }

        txn.commit().await?;

        log::info!(
            "Deleted ticket {} and released number {}",
            ticket.id,
            ticket.number
        );
        Ok(())
    }

    /// 某期全部票（导出/管理列表用），按创建时间正序
    pub async fn list_tickets(&self, draw_id: i64) -> AppResult<Vec<TicketResponse>> {
        let list = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .order_by_asc(tickets::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 全部票（跨活动），倒序分页
    pub async fn list_all_tickets(
        &self,
        query: &TicketQuery,
    ) -> AppResult<PaginatedResponse<TicketResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = tickets::Entity::find();
        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(tickets::Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<TicketResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            limit,
            total,
        ))
    }

    /// 某期全部票导出为 CSV
    pub async fn export_tickets_csv(&self, draw_id: i64) -> AppResult<String> {
        let list = tickets::Entity::find()
            .filter(tickets::Column::DrawId.eq(draw_id))
            .order_by_asc(tickets::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(tickets_to_csv(&list))
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    /// 购票字段校验（不进事务）
    fn validate_booking(&self, request: &BookTicketRequest) -> AppResult<()> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        if request.phone.trim().is_empty() {
            return Err(AppError::ValidationError("Phone is required".to_string()));
        }
        validate_phone(request.phone.trim())?;

        match self.config.identity_field {
            IdentityField::IdNumber => {
                if request
                    .id_number
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or("")
                    .is_empty()
                {
                    return Err(AppError::ValidationError(
                        "Identity document number is required".to_string(),
                    ));
                }
            }
            IdentityField::Email => {
                let email = request.email.as_deref().map(str::trim).unwrap_or("");
                if email.is_empty() || !email.contains('@') {
                    return Err(AppError::ValidationError(
                        "A valid email is required".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// 一次完整的分配事务尝试
    async fn try_allocate(
        &self,
        draw_id: i64,
        request: &BookTicketRequest,
    ) -> Result<BookTicketResponse, AttemptError> {
        let txn = self
            .pool
            .begin()
            .await
            .map_err(|e| AttemptError::Fatal(AppError::DatabaseError(e)))?;

        let draw = draws::Entity::find_by_id(draw_id)
            .one(&txn)
            .await
            .map_err(attempt_err)?
            .ok_or(AttemptError::Fatal(AppError::DrawNotFound))?;

        let selected = match self.reserve_free_number(&txn, draw.id).await? {
            Some(n) => n,
            None => {
                // 号池耗尽：整体放弃，无任何写入留存
                txn.rollback()
                    .await
                    .map_err(|e| AttemptError::Fatal(AppError::DatabaseError(e)))?;
                return Err(AttemptError::Fatal(AppError::NoAvailableNumbers));
            }
        };

        let display_number = format_ticket_number(&self.config.prefix, selected);

        let ticket = tickets::ActiveModel {
            draw_id: Set(draw.id),
            name: Set(request.name.trim().to_string()),
            phone: Set(request.phone.trim().to_string()),
            email: Set(request
                .email
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)),
            id_number: Set(request
                .id_number
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)),
            ticket_number: Set(display_number.clone()),
            number: Set(selected),
            status: Set(TicketStatus::Booked),
            picked_at: Set(None),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(attempt_err)?;

        // 按第 1 步读到的值递增，而非盲加一：
        // 守护条件落空说明有并发订票/删票改过计数，本次尝试整体作废
        let update: UpdateResult = draws::Entity::update_many()
            .col_expr(
                draws::Column::TicketsSold,
                Expr::value(draw.tickets_sold + 1),
            )
            .col_expr(draws::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(draws::Column::Id.eq(draw.id))
            .filter(draws::Column::TicketsSold.eq(draw.tickets_sold))
            .exec(&txn)
            .await
            .map_err(attempt_err)?;

        if update.rows_affected != 1 {
            txn.rollback()
                .await
                .map_err(|e| AttemptError::Fatal(AppError::DatabaseError(e)))?;
            return Err(AttemptError::Conflict);
        }

        // 提交失败按冲突处理：失败的事务不留任何状态，整体重试安全
        txn.commit().await.map_err(|_| AttemptError::Conflict)?;

        Ok(BookTicketResponse {
            ticket_id: ticket.id,
            ticket_number: display_number,
        })
    }

    /// 在事务内找到并占用一个空闲号码
    ///
    /// 先做 random_tries 次均匀随机探测（号池稀疏时期望 O(1) 命中），
    /// 全部撞车后顺序扫描整个区间取第一个空闲号，保证只要还有号就能拿到。
    /// 返回 None 代表号池已满。
    async fn reserve_free_number(
        &self,
        txn: &DatabaseTransaction,
        draw_id: i64,
    ) -> Result<Option<i64>, AttemptError> {
        let min = self.config.min_number;
        let max = self.config.max_number;

        // 随机探测
        for _ in 0..self.config.random_tries {
            let candidate = {
                let mut rng = rand::thread_rng();
                rng.gen_range(min..=max)
            };

            let taken = numbers::Entity::find_by_id(candidate)
                .one(txn)
                .await
                .map_err(attempt_err)?
                .is_some();

            if !taken {
                self.reserve(txn, candidate, draw_id).await?;
                return Ok(Some(candidate));
            }
        }

        // 顺序扫描兜底：一次取出区间内全部已占用号码再找第一个空洞
        let taken: HashSet<i64> = numbers::Entity::find()
            .filter(numbers::Column::Number.between(min, max))
            .all(txn)
            .await
            .map_err(attempt_err)?
            .into_iter()
            .map(|m| m.number)
            .collect();

        for candidate in min..=max {
            if !taken.contains(&candidate) {
                self.reserve(txn, candidate, draw_id).await?;
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    /// 占用号码：主键插入，并发撞车以唯一冲突形式暴露并归类为 Conflict
    async fn reserve(
        &self,
        txn: &DatabaseTransaction,
        number: i64,
        draw_id: i64,
    ) -> Result<(), AttemptError> {
        numbers::ActiveModel {
            number: Set(number),
            draw_id: Set(draw_id),
            reserved_at: Set(Some(Utc::now())),
        }
        .insert(txn)
        .await
        .map_err(attempt_err)?;

        Ok(())
    }
}
