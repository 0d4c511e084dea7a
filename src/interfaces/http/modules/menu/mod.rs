//! Menu module: daily dishes, week view and the weekday fee table

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
