//! Auth module: login, current member, password change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
