//! Payment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{PaymentEntry, SubmitPayment};
use crate::domain::Payment;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    /// `pending`, `approved` or `rejected`
    pub status: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            member_name: None,
            date: p.date,
            amount: p.amount,
            method: p.method,
            reference: p.reference,
            status: p.status.as_str().to_string(),
            approved_by: p.approved_by,
            approved_at: p.approved_at,
            created_at: p.created_at,
        }
    }
}

impl From<PaymentEntry> for PaymentDto {
    fn from(entry: PaymentEntry) -> Self {
        Self {
            member_name: Some(entry.member_name),
            ..entry.payment.into()
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitPaymentRequest {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Cash, bKash, bank transfer...
    #[validate(length(max = 50, message = "method must be at most 50 characters"))]
    pub method: Option<String>,
    #[validate(length(max = 100, message = "reference must be at most 100 characters"))]
    pub reference: Option<String>,
}

impl From<SubmitPaymentRequest> for SubmitPayment {
    fn from(r: SubmitPaymentRequest) -> Self {
        Self {
            date: r.date,
            amount: r.amount,
            method: r.method,
            reference: r.reference,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecisionRequest {
    /// `approve` or `reject`
    #[validate(length(min = 1, message = "action is required"))]
    pub action: String,
}
