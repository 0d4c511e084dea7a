//! Meals module: opt-outs for tomorrow and the admin cancellation report

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
