//! Organization-wide expenses

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::application::identity::Actor;
use crate::domain::expense::total_amount;
use crate::domain::{BillingMonth, DomainResult, Expense, NewExpense, RepositoryProvider};
use crate::shared::money::require_positive_amount;

/// Expenses of one month with their sum
#[derive(Debug, Clone)]
pub struct ExpenseListing {
    pub month: BillingMonth,
    pub items: Vec<Expense>,
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct RecordExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
}

pub struct ExpenseService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ExpenseService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn record_expense(
        &self,
        actor: &Actor,
        input: RecordExpense,
    ) -> DomainResult<Expense> {
        let amount = require_positive_amount(input.amount)?;
        let expense = self
            .repos
            .expenses()
            .create(NewExpense {
                date: input.date,
                amount,
                category: non_blank(input.category),
                notes: non_blank(input.notes),
                created_by: Some(actor.member_id.clone()),
            })
            .await?;

        info!(
            expense_id = expense.id,
            date = %expense.date,
            amount = %expense.amount,
            created_by = %actor.member_id,
            "Expense recorded"
        );
        Ok(expense)
    }

    pub async fn list_expenses(&self, month: BillingMonth) -> DomainResult<ExpenseListing> {
        let items = self
            .repos
            .expenses()
            .find_in_range(month.first_day(), month.last_day())
            .await?;
        let total = total_amount(&items);

        Ok(ExpenseListing {
            month,
            items,
            total,
        })
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
