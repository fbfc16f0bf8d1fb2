//! 授权标记工具
//!
//! 用法: set-admin-claim <email> [true|false]
//!
//! 设置指定账号的 is_admin 授权标记（缺省为 true）。
//! 已签发的令牌不受影响，新标记在下次登录/刷新时生效。

use chrono::Utc;
use env_logger::Env;
use landdraw_backend::{
    config::Config, database::create_pool, entities::admin_user_entity as admin_users,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(email) = args.next() else {
        eprintln!("Usage: set-admin-claim <email> [true|false]");
        process::exit(1);
    };

    let flag_raw = args.next().unwrap_or_else(|| "true".to_string());
    let is_admin = matches!(flag_raw.as_str(), "true" | "1" | "yes");

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

    let email = email.trim().to_lowercase();

    let user = match admin_users::Entity::find()
        .filter(admin_users::Column::Email.eq(&email))
        .one(&pool)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            eprintln!("No account found for {email}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to look up account: {e}");
            process::exit(1);
        }
    };

    let mut account = user.into_active_model();
    account.is_admin = Set(is_admin);
    account.updated_at = Set(Some(Utc::now()));

    match account.update(&pool).await {
        Ok(_) => {
            println!("Set admin={is_admin} for {email}");
        }
        Err(e) => {
            eprintln!("Failed to set admin claim: {e}");
            process::exit(1);
        }
    }
}
