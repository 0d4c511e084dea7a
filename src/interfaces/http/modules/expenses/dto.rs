//! Expense DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{ExpenseListing, RecordExpense};
use crate::domain::Expense;

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseDto {
    pub id: i32,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseDto {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            date: e.date,
            amount: e.amount,
            category: e.category,
            notes: e.notes,
            created_by: e.created_by,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    /// Must be positive
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl From<CreateExpenseRequest> for RecordExpense {
    fn from(r: CreateExpenseRequest) -> Self {
        Self {
            date: r.date,
            amount: r.amount,
            category: r.category,
            notes: r.notes,
        }
    }
}

/// A month's expenses and their sum
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseListDto {
    /// `YYYY-MM`
    pub month: String,
    pub items: Vec<ExpenseDto>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl From<ExpenseListing> for ExpenseListDto {
    fn from(l: ExpenseListing) -> Self {
        Self {
            month: l.month.to_string(),
            items: l.items.into_iter().map(ExpenseDto::from).collect(),
            total: l.total,
        }
    }
}
