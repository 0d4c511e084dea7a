use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Money spent by the mess (groceries, gas, staff). Organization-wide.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
    /// Admin who recorded it; cleared if that member is deleted
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// Sum of expense amounts
pub fn total_amount<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Decimal {
    expenses.into_iter().map(|e| e.amount).sum()
}
