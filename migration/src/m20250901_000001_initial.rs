use sea_orm_migration::prelude::*;

/// Draws (每期抽奖活动)
#[derive(DeriveIden)]
enum Draws {
    Table,
    Id,
    Title,
    Prize,
    DrawDate,
    TicketPrice,
    TotalTickets,
    TicketsSold,
    TicketCounter,
    Status,
    WinnerTicketId,
    CreatedAt,
    UpdatedAt,
}

/// Tickets (已售出的票)
#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    DrawId,
    Name,
    Phone,
    Email,
    IdNumber,
    TicketNumber,
    Number,
    Status,
    PickedAt,
    CreatedAt,
}

/// Ticket Numbers (号码占用表)
/// number 本身为主键，行存在即代表该号码已被占用
#[derive(DeriveIden)]
enum TicketNumbers {
    Table,
    Number,
    DrawId,
    ReservedAt,
}

/// Admin Users (后台管理账号)
#[derive(DeriveIden)]
enum AdminUsers {
    Table,
    Id,
    Email,
    PasswordHash,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始表结构:
/// - draws: tickets_sold 与该期关联票数保持一致 (协议内事务更新)
/// - tickets: ticket_number 为展示字符串 (LUCKY-0151)，number 为原始整数
/// - ticket_numbers: 号码全局唯一占用，主键冲突即并发预订冲突
/// - admin_users: is_admin 即 CLI set-admin-claim 写入的授权标记
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 抽奖活动表
        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Draws::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Draws::Prize).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Draws::DrawDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::TicketPrice)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Draws::TotalTickets).big_integer().null())
                    .col(
                        ColumnDef::new(Draws::TicketsSold)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Draws::TicketCounter)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Draws::Status)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Draws::WinnerTicketId).big_integer().null())
                    .col(
                        ColumnDef::new(Draws::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Draws::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 号码占用表 (主键即占用见证)
        manager
            .create_table(
                Table::create()
                    .table(TicketNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TicketNumbers::Number)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TicketNumbers::DrawId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TicketNumbers::ReservedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 票表
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::DrawId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Tickets::Phone).string_len(64).not_null())
                    .col(ColumnDef::new(Tickets::Email).string_len(255).null())
                    .col(ColumnDef::new(Tickets::IdNumber).string_len(64).null())
                    .col(
                        ColumnDef::new(Tickets::TicketNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::Number).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string_len(32)
                            .not_null()
                            .default("booked"),
                    )
                    .col(
                        ColumnDef::new(Tickets::PickedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 按期查询票
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_draw")
                    .table(Tickets::Table)
                    .col(Tickets::DrawId)
                    .to_owned(),
            )
            .await?;

        // 展示票号唯一 (number 唯一性已由 ticket_numbers 主键保证，这里兜底展示串)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_ticket_number_unique")
                    .table(Tickets::Table)
                    .col(Tickets::TicketNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 管理员账号表
        manager
            .create_table(
                Table::create()
                    .table(AdminUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminUsers::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(AdminUsers::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 邮箱唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_users_email_unique")
                    .table(AdminUsers::Table)
                    .col(AdminUsers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：票 -> 号码 -> 活动 -> 管理员
        manager
            .drop_table(Table::drop().if_exists().table(Tickets::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(TicketNumbers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(AdminUsers::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
