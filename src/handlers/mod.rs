pub mod admin;
pub mod auth;
pub mod contact;
pub mod draw;
pub mod ticket;

pub use admin::admin_config;
pub use auth::auth_config;
pub use contact::contact_config;
pub use draw::draw_config;
