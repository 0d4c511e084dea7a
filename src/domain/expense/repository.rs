use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Expense, NewExpense};
use crate::domain::DomainResult;

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn create(&self, expense: NewExpense) -> DomainResult<Expense>;
    /// Expenses dated within `[from, to]`, newest first
    async fn find_in_range(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<Vec<Expense>>;
}
