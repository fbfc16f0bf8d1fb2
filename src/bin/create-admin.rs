//! 后台账号创建工具
//!
//! 用法: create-admin <email> <password>
//!
//! 创建一个后台账号（is_admin 初始为 false，需再用 set-admin-claim 授权）。

use chrono::Utc;
use env_logger::Env;
use landdraw_backend::{
    config::Config,
    database::create_pool,
    entities::admin_user_entity as admin_users,
    utils::{hash_password, validate_password},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        eprintln!("Usage: create-admin <email> <password>");
        process::exit(1);
    };

    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        eprintln!("Invalid email: {email}");
        process::exit(1);
    }

    if let Err(e) = validate_password(&password) {
        eprintln!("Password rejected: {e}");
        process::exit(1);
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            process::exit(1);
        }
    };

    let config = match Config::from_toml() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            process::exit(1);
        }
    };

    match admin_users::Entity::find()
        .filter(admin_users::Column::Email.eq(&email))
        .one(&pool)
        .await
    {
        Ok(Some(_)) => {
            eprintln!("Account already exists: {email}");
            process::exit(1);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to look up account: {e}");
            process::exit(1);
        }
    }

    let now = Utc::now();
    let account = admin_users::ActiveModel {
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        is_admin: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    };

    match account.insert(&pool).await {
        Ok(created) => {
            println!("Created account {} (id={})", created.email, created.id);
        }
        Err(e) => {
            eprintln!("Failed to create account: {e}");
            process::exit(1);
        }
    }
}
