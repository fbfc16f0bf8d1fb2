pub mod auth_service;
pub mod contact_service;
pub mod draw_service;
pub mod ticket_service;

pub use auth_service::*;
pub use contact_service::*;
pub use draw_service::*;
pub use ticket_service::*;
