//! 号码分配 / 补偿删除协议的端到端测试
//!
//! 跑在进程内 SQLite 上：单连接池令写事务天然串行，
//! 表结构直接由实体生成，不经过 Postgres 迁移。

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbBackend, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Schema, Set,
};
use std::collections::HashSet;

use landdraw_backend::config::{IdentityField, TicketConfig};
use landdraw_backend::entities::{
    TicketStatus, draw_entity as draws, ticket_entity as tickets, ticket_number_entity as numbers,
};
use landdraw_backend::error::AppError;
use landdraw_backend::models::{BookTicketRequest, CreateDrawRequest};
use landdraw_backend::services::{DrawService, TicketService};

async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.expect("connect sqlite");

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    for stmt in [
        schema.create_table_from_entity(draws::Entity),
        schema.create_table_from_entity(tickets::Entity),
        schema.create_table_from_entity(numbers::Entity),
    ] {
        db.execute(backend.build(&stmt)).await.expect("create table");
    }

    db
}

async fn create_draw(db: &DatabaseConnection) -> i64 {
    DrawService::new(db.clone())
        .create_draw(CreateDrawRequest {
            title: "Premium Plot Lucky Draw".to_string(),
            prize: "Residential Plot - Sector 12".to_string(),
            draw_date: Utc::now() + Duration::days(7),
            ticket_price: 1000,
            total_tickets: Some(500),
        })
        .await
        .expect("create draw")
        .id
}

fn booking(name: &str) -> BookTicketRequest {
    BookTicketRequest {
        name: name.to_string(),
        phone: "+919876543210".to_string(),
        email: None,
        id_number: Some("1234-5678-9012".to_string()),
    }
}

async fn tickets_sold(db: &DatabaseConnection, draw_id: i64) -> i64 {
    draws::Entity::find_by_id(draw_id)
        .one(db)
        .await
        .expect("read draw")
        .expect("draw exists")
        .tickets_sold
}

#[tokio::test]
async fn booking_reserves_number_in_range_and_increments_counter() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let booked = service.book_ticket(draw_id, &booking("Asha Rao")).await.unwrap();

    let ticket = tickets::Entity::find_by_id(booked.ticket_id)
        .one(&db)
        .await
        .unwrap()
        .expect("ticket persisted");
    assert!((151..=2000).contains(&ticket.number));
    assert_eq!(ticket.status, TicketStatus::Booked);
    assert_eq!(booked.ticket_number, format!("LUCKY-{:04}", ticket.number));

    // 号码占用记录与票在同一事务写入
    let reservation = numbers::Entity::find_by_id(ticket.number)
        .one(&db)
        .await
        .unwrap()
        .expect("number reserved");
    assert_eq!(reservation.draw_id, draw_id);

    assert_eq!(tickets_sold(&db, draw_id).await, 1);
}

#[tokio::test]
async fn sequential_bookings_never_reuse_a_number() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let mut seen = HashSet::new();
    for i in 0..20 {
        let booked = service
            .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
            .await
            .unwrap();
        let ticket = tickets::Entity::find_by_id(booked.ticket_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(seen.insert(ticket.number), "number {} reused", ticket.number);
    }

    assert_eq!(tickets_sold(&db, draw_id).await, 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_get_distinct_numbers() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let mut handles = Vec::new();
    for i in 0..50 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
                .await
        }));
    }

    let mut numbers_seen = HashSet::new();
    for handle in handles {
        let booked = handle.await.expect("task").expect("booking succeeds");
        let ticket = tickets::Entity::find_by_id(booked.ticket_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(
            numbers_seen.insert(ticket.number),
            "number {} handed out twice",
            ticket.number
        );
    }

    assert_eq!(numbers_seen.len(), 50);
    assert_eq!(tickets_sold(&db, draw_id).await, 50);
}

#[tokio::test]
async fn exhausted_pool_fails_without_side_effects() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;

    // 收窄号池到 3 个号，全部占满后再订
    let config = TicketConfig {
        min_number: 151,
        max_number: 153,
        random_tries: 10,
        ..TicketConfig::default()
    };
    let service = TicketService::new(db.clone(), config);

    for i in 0..3 {
        service
            .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
            .await
            .unwrap();
    }

    let err = service
        .book_ticket(draw_id, &booking("Latecomer"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoAvailableNumbers));

    // 失败路径不留任何痕迹
    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 3);
    assert_eq!(numbers::Entity::find().count(&db).await.unwrap(), 3);
    assert_eq!(tickets_sold(&db, draw_id).await, 3);
}

#[tokio::test]
async fn booking_missing_draw_fails_cleanly() {
    let db = setup_db().await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let err = service.book_ticket(999, &booking("Nobody")).await.unwrap_err();
    assert!(matches!(err, AppError::DrawNotFound));

    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(numbers::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_ticket_releases_its_number_for_rebooking() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;

    // 单号号池：释放后必须能重新拿到同一个号
    let config = TicketConfig {
        min_number: 151,
        max_number: 151,
        random_tries: 5,
        ..TicketConfig::default()
    };
    let service = TicketService::new(db.clone(), config);

    let first = service.book_ticket(draw_id, &booking("First")).await.unwrap();
    assert_eq!(first.ticket_number, "LUCKY-0151");
    assert_eq!(tickets_sold(&db, draw_id).await, 1);

    service.delete_ticket(first.ticket_id).await.unwrap();

    assert!(
        numbers::Entity::find_by_id(151)
            .one(&db)
            .await
            .unwrap()
            .is_none(),
        "reservation should be gone after deletion"
    );
    assert_eq!(tickets_sold(&db, draw_id).await, 0);

    let second = service.book_ticket(draw_id, &booking("Second")).await.unwrap();
    assert_eq!(second.ticket_number, "LUCKY-0151");
    assert_ne!(second.ticket_id, first.ticket_id);
}

#[tokio::test]
async fn deleting_with_zero_counter_stays_at_zero() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let booked = service.book_ticket(draw_id, &booking("Only")).await.unwrap();

    // 人为把计数拉回 0，删除后不得变成负数
    let draw = draws::Entity::find_by_id(draw_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut active = draw.into_active_model();
    active.tickets_sold = Set(0);
    active.update(&db).await.unwrap();

    service.delete_ticket(booked.ticket_id).await.unwrap();

    assert_eq!(tickets_sold(&db, draw_id).await, 0);
}

#[tokio::test]
async fn deleting_missing_ticket_fails() {
    let db = setup_db().await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let err = service.delete_ticket(12345).await.unwrap_err();
    assert!(matches!(err, AppError::TicketNotFound));
}

#[tokio::test]
async fn counter_matches_ticket_rows_after_interleaving() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let mut ids = Vec::new();
    for i in 0..5 {
        let booked = service
            .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
            .await
            .unwrap();
        ids.push(booked.ticket_id);
    }

    service.delete_ticket(ids[0]).await.unwrap();
    service.delete_ticket(ids[3]).await.unwrap();

    for i in 5..8 {
        service
            .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
            .await
            .unwrap();
    }

    let row_count = tickets::Entity::find()
        .filter(tickets::Column::DrawId.eq(draw_id))
        .count(&db)
        .await
        .unwrap() as i64;
    assert_eq!(row_count, 6);
    assert_eq!(tickets_sold(&db, draw_id).await, row_count);
}

#[tokio::test]
async fn validation_failures_never_reach_the_store() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let service = TicketService::new(db.clone(), TicketConfig::default());

    let mut no_name = booking("Anyone");
    no_name.name = "  ".to_string();
    assert!(matches!(
        service.book_ticket(draw_id, &no_name).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    let mut no_identity = booking("Anyone");
    no_identity.id_number = None;
    assert!(matches!(
        service.book_ticket(draw_id, &no_identity).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    let mut bad_phone = booking("Anyone");
    bad_phone.phone = "not-a-phone".to_string();
    assert!(matches!(
        service.book_ticket(draw_id, &bad_phone).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(numbers::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(tickets_sold(&db, draw_id).await, 0);
}

#[tokio::test]
async fn email_identity_mode_requires_email() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;

    let config = TicketConfig {
        identity_field: IdentityField::Email,
        ..TicketConfig::default()
    };
    let service = TicketService::new(db.clone(), config);

    // 证件号版请求在邮箱版部署下不合法
    assert!(matches!(
        service.book_ticket(draw_id, &booking("Anyone")).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    let mut with_email = booking("Anyone");
    with_email.email = Some("buyer@example.com".to_string());
    with_email.id_number = None;
    let booked = service.book_ticket(draw_id, &with_email).await.unwrap();

    let ticket = tickets::Entity::find_by_id(booked.ticket_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.email.as_deref(), Some("buyer@example.com"));
    assert_eq!(ticket.id_number, None);
}
