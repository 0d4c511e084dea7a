//! Payments module: submission by members, approval by admins

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
