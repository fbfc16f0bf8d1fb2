pub mod auth;
pub mod common;
pub mod contact;
pub mod draw;
pub mod pagination;
pub mod ticket;

pub use auth::*;
pub use common::*;
pub use contact::*;
pub use draw::*;
pub use pagination::*;
pub use ticket::*;
