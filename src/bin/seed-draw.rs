//! 示例活动种子工具
//!
//! 用法: seed-draw
//!
//! 插入一条演示活动（7 天后开奖），便于本地联调。

use chrono::{Duration, Utc};
use env_logger::Env;
use landdraw_backend::{
    config::Config, database::create_pool, models::CreateDrawRequest, services::DrawService,
};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

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

    let service = DrawService::new(pool);

    let request = CreateDrawRequest {
        title: "Premium Plot Lucky Draw".to_string(),
        prize: "Residential Plot - Sector 12".to_string(),
        draw_date: Utc::now() + Duration::days(7),
        ticket_price: 1000,
        total_tickets: Some(500),
    };

    match service.create_draw(request).await {
        Ok(draw) => {
            println!("Seeded draw {} ({})", draw.id, draw.title);
        }
        Err(e) => {
            eprintln!("Failed to seed draw: {e}");
            process::exit(1);
        }
    }
}
