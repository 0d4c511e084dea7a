//! Bills module: bulk generation, own bill, member statement

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
