//! # Mess Hall Management Service
//!
//! REST service for running a shared dining hall: member accounts, daily
//! meal opt-outs, expenses, payments, the weekly menu and the monthly bill.
//!
//! ## Architecture
//!
//! - **domain**: entities, value types, the billing arithmetic and repository traits
//! - **application**: use-case services orchestrating the repositories
//! - **infrastructure**: SeaORM persistence, migrations, crypto
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: errors, pagination, retry and shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::database::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
