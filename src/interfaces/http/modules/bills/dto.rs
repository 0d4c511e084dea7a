//! Bill DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::{BillStatement, BillSummary, MemberBill, MonthBills};
use crate::domain::MonthlyBill;
use crate::interfaces::http::modules::meals::MealDto;
use crate::interfaces::http::modules::payments::PaymentDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct BillDto {
    pub id: i32,
    pub member_id: String,
    /// `YYYY-MM`
    pub month: String,
    /// Taken meal-units
    pub total_meals: i64,
    pub cancelled_meals: i64,
    pub billable_meals: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub meal_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub due_amount: Decimal,
    /// `pending`, `paid` or `overdue`
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<MonthlyBill> for BillDto {
    fn from(b: MonthlyBill) -> Self {
        let f = b.figures;
        Self {
            id: b.id,
            member_id: b.member_id,
            month: b.month.to_string(),
            total_meals: f.total_meals,
            cancelled_meals: f.cancelled_meals,
            billable_meals: f.billable_meals,
            meal_rate: f.meal_rate,
            total_amount: f.total_amount,
            paid_amount: f.paid_amount,
            due_amount: f.due_amount,
            status: f.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

/// A member's bill with the payments and meal rows behind it
#[derive(Debug, Serialize, ToSchema)]
pub struct StatementDto {
    pub member_name: String,
    pub mess_start_date: Option<NaiveDate>,
    pub bill: BillDto,
    pub payments: Vec<PaymentDto>,
    pub meals: Vec<MealDto>,
}

impl From<BillStatement> for StatementDto {
    fn from(s: BillStatement) -> Self {
        Self {
            member_name: s.member_name,
            mess_start_date: s.mess_start_date,
            bill: s.bill.into(),
            payments: s.payments.into_iter().map(PaymentDto::from).collect(),
            meals: s.meals.into_iter().map(MealDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberBillDto {
    pub member_name: String,
    pub member_email: String,
    pub mess_start_date: Option<NaiveDate>,
    pub bill: BillDto,
}

impl From<MemberBill> for MemberBillDto {
    fn from(b: MemberBill) -> Self {
        Self {
            member_name: b.member_name,
            member_email: b.member_email,
            mess_start_date: b.mess_start_date,
            bill: b.bill.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillSummaryDto {
    pub total_members: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_billed: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_due: Decimal,
}

impl From<BillSummary> for BillSummaryDto {
    fn from(s: BillSummary) -> Self {
        Self {
            total_members: s.total_members,
            total_billed: s.total_billed,
            total_paid: s.total_paid,
            total_due: s.total_due,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthBillsDto {
    pub month: String,
    pub bills: Vec<MemberBillDto>,
    pub summary: BillSummaryDto,
}

impl From<MonthBills> for MonthBillsDto {
    fn from(m: MonthBills) -> Self {
        Self {
            month: m.month.to_string(),
            bills: m.bills.into_iter().map(MemberBillDto::from).collect(),
            summary: m.summary.into(),
        }
    }
}
