//! 管理端流程测试：整体删除、开奖、登录与留言

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    EntityTrait, IntoActiveModel, PaginatorTrait, Schema, Set,
};

use landdraw_backend::config::TicketConfig;
use landdraw_backend::entities::{
    DrawStatus, TicketStatus, admin_user_entity as admin_users, contact_entity as contacts,
    draw_entity as draws, ticket_entity as tickets, ticket_number_entity as numbers,
};
use landdraw_backend::error::AppError;
use landdraw_backend::models::{BookTicketRequest, ContactRequest, CreateDrawRequest, LoginRequest};
use landdraw_backend::services::{AuthService, ContactService, DrawService, TicketService};
use landdraw_backend::utils::JwtService;

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
        schema.create_table_from_entity(contacts::Entity),
        schema.create_table_from_entity(admin_users::Entity),
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

#[tokio::test]
async fn bulk_draw_deletion_cascades_tickets_but_keeps_reservations() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let draw_service = DrawService::new(db.clone());
    let ticket_service = TicketService::new(db.clone(), TicketConfig::default());

    for i in 0..2 {
        ticket_service
            .book_ticket(draw_id, &booking(&format!("Buyer {i}")))
            .await
            .unwrap();
    }

    draw_service.delete_draw(draw_id).await.unwrap();

    assert!(draws::Entity::find_by_id(draw_id).one(&db).await.unwrap().is_none());
    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 0);
    // 现行设计：整体删除不释放号码占用
    assert_eq!(numbers::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn deleting_missing_draw_fails() {
    let db = setup_db().await;
    let err = DrawService::new(db.clone()).delete_draw(404).await.unwrap_err();
    assert!(matches!(err, AppError::DrawNotFound));
}

#[tokio::test]
async fn marking_winner_closes_draw_and_flags_ticket() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let draw_service = DrawService::new(db.clone());
    let ticket_service = TicketService::new(db.clone(), TicketConfig::default());

    let booked = ticket_service.book_ticket(draw_id, &booking("Winner")).await.unwrap();

    draw_service.mark_winner(draw_id, booked.ticket_id).await.unwrap();

    let draw = draws::Entity::find_by_id(draw_id).one(&db).await.unwrap().unwrap();
    assert_eq!(draw.status, DrawStatus::Closed);
    assert_eq!(draw.winner_ticket_id, Some(booked.ticket_id));

    let ticket = tickets::Entity::find_by_id(booked.ticket_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Winner);
    assert!(ticket.picked_at.is_some());
}

#[tokio::test]
async fn second_winner_on_closed_draw_is_rejected() {
    let db = setup_db().await;
    let draw_id = create_draw(&db).await;
    let draw_service = DrawService::new(db.clone());
    let ticket_service = TicketService::new(db.clone(), TicketConfig::default());

    let first = ticket_service.book_ticket(draw_id, &booking("First")).await.unwrap();
    let second = ticket_service.book_ticket(draw_id, &booking("Second")).await.unwrap();

    draw_service.mark_winner(draw_id, first.ticket_id).await.unwrap();

    let err = draw_service
        .mark_winner(draw_id, second.ticket_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 已关活动的中奖票保持不变
    let draw = draws::Entity::find_by_id(draw_id).one(&db).await.unwrap().unwrap();
    assert_eq!(draw.winner_ticket_id, Some(first.ticket_id));
}

#[tokio::test]
async fn winner_ticket_must_belong_to_the_draw() {
    let db = setup_db().await;
    let draw_a = create_draw(&db).await;
    let draw_b = create_draw(&db).await;
    let draw_service = DrawService::new(db.clone());
    let ticket_service = TicketService::new(db.clone(), TicketConfig::default());

    let foreign = ticket_service.book_ticket(draw_b, &booking("Other")).await.unwrap();

    let err = draw_service.mark_winner(draw_a, foreign.ticket_id).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let draw = draws::Entity::find_by_id(draw_a).one(&db).await.unwrap().unwrap();
    assert_eq!(draw.status, DrawStatus::Active);
}

#[tokio::test]
async fn admin_login_and_claim_flow() {
    let db = setup_db().await;

    // 建号时未授权，令牌应带 is_admin=false
    let now = Utc::now();
    let hash = landdraw_backend::utils::hash_password("Password123").unwrap();
    let created = admin_users::ActiveModel {
        email: Set("ops@example.com".to_string()),
        password_hash: Set(hash),
        is_admin: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let jwt = JwtService::new("test-secret", 3600, 86400);
    let auth = AuthService::new(db.clone(), jwt.clone());

    let err = auth
        .login(LoginRequest {
            email: "ops@example.com".to_string(),
            password: "WrongPassword1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let session = auth
        .login(LoginRequest {
            email: "ops@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, created.id);
    assert!(!session.user.is_admin);

    let claims = jwt.verify_access_token(&session.access_token).unwrap();
    assert!(!claims.is_admin);

    // 授权后刷新令牌要反映新的标记
    let mut account = admin_users::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .into_active_model();
    account.is_admin = Set(true);
    account.update(&db).await.unwrap();

    let refreshed = auth.refresh(&session.refresh_token).await.unwrap();
    let claims = jwt.verify_access_token(&refreshed.access_token).unwrap();
    assert!(claims.is_admin);
}

#[tokio::test]
async fn contact_messages_are_saved_and_listed_newest_first() {
    let db = setup_db().await;
    let service = ContactService::new(db.clone());

    service
        .save_contact(ContactRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            message: "When is the draw?".to_string(),
        })
        .await
        .unwrap();

    service
        .save_contact(ContactRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: Some("+919876543210".to_string()),
            message: "Plot details please".to_string(),
        })
        .await
        .unwrap();

    let err = service
        .save_contact(ContactRequest {
            name: "".to_string(),
            email: "x@example.com".to_string(),
            phone: None,
            message: "hi".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let list = service.list_contacts().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "Ravi");
}
