pub mod csv;
pub mod jwt;
pub mod password;
pub mod phone;
pub mod ticket_number;

pub use csv::tickets_to_csv;
pub use jwt::*;
pub use password::*;
pub use phone::*;
pub use ticket_number::format_ticket_number;
