//! Billing aggregate
//!
//! The billing period, the bill arithmetic and the stored bill snapshot.

pub mod calculator;
pub mod model;
pub mod month;
pub mod repository;

pub use calculator::{compute_bill, fallback_units, meal_rate, BillFigures, BillInputs, MEALS_PER_DAY};
pub use model::{BillStatus, MonthlyBill};
pub use month::BillingMonth;
pub use repository::MonthlyBillRepository;
