//! Expense aggregate

pub mod model;
pub mod repository;

pub use model::{total_amount, Expense, NewExpense};
pub use repository::ExpenseRepository;
