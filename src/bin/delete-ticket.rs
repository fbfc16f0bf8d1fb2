//! 管理端删票工具
//!
//! 用法: delete-ticket <ticketId>
//!
//! 直接调用补偿删除协议：同一事务内删除票、释放其占用号码并回退
//! 所属活动的已售计数。绕过 HTTP 层权限，谨慎使用。

use env_logger::Env;
use landdraw_backend::{config::Config, database::create_pool, services::TicketService};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(raw_id) = args.next() else {
        eprintln!("Usage: delete-ticket <ticketId>");
        process::exit(1);
    };

    let ticket_id: i64 = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => {
            eprintln!("Invalid ticket id: {raw_id}");
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

    let service = TicketService::new(pool, config.ticket.clone());

    match service.delete_ticket(ticket_id).await {
        Ok(()) => {
            println!("Ticket deleted successfully: {ticket_id}");
        }
        Err(e) => {
            eprintln!("Failed to delete ticket: {e}");
            process::exit(1);
        }
    }
}
