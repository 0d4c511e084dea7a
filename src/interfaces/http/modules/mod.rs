pub mod auth;
pub mod bills;
pub mod expenses;
pub mod health;
pub mod meals;
pub mod members;
pub mod menu;
pub mod metrics;
pub mod payments;
pub mod request_id;
