//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{approved_total, NewPayment, Payment, PaymentDecision, PaymentStatus};
pub use repository::PaymentRepository;
