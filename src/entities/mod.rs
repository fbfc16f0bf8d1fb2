pub mod admin_users;
pub mod contacts;
pub mod draws;
pub mod ticket_numbers;
pub mod tickets;

pub use admin_users as admin_user_entity;
pub use contacts as contact_entity;
pub use draws as draw_entity;
pub use ticket_numbers as ticket_number_entity;
pub use tickets as ticket_entity;

pub use draws::DrawStatus;
pub use tickets::TicketStatus;
