//! Outer adapters
//!
//! - `http`: axum REST API with Swagger documentation

pub mod http;
