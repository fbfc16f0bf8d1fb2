use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Draw not found")]
    DrawNotFound,

    #[error("Ticket not found")]
    TicketNotFound,

    #[error("No available ticket numbers")]
    NoAvailableNumbers,

    #[error("Ticket allocation contention budget exhausted")]
    ContentionExceeded,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DrawNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "DRAW_NOT_FOUND",
                "Draw not found".to_string(),
            ),
            AppError::TicketNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "TICKET_NOT_FOUND",
                "Ticket not found".to_string(),
            ),
            AppError::NoAvailableNumbers => {
                // 号池耗尽属于终态，重试无意义
                log::warn!("Ticket number pool exhausted");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "NO_AVAILABLE_NUMBERS",
                    "All ticket numbers are sold out".to_string(),
                )
            }
            AppError::ContentionExceeded => {
                // 事务冲突预算用尽，调用方整体重试是安全的
                log::warn!("Allocation contention budget exhausted");
                (
                    actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                    "CONTENTION_EXCEEDED",
                    "Booking is busy, please try again".to_string(),
                )
            }
            AppError::PermissionDenied => {
                log::warn!("Permission denied");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "Permission denied".to_string(),
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
