//! Payment domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin verdict on a pending payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentDecision {
    Approve,
    Reject,
}

impl PaymentDecision {
    pub fn resulting_status(&self) -> PaymentStatus {
        match self {
            Self::Approve => PaymentStatus::Approved,
            Self::Reject => PaymentStatus::Rejected,
        }
    }
}

impl std::str::FromStr for PaymentDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Ok(Self::Approve),
            "reject" | "rejected" => Ok(Self::Reject),
            other => Err(format!(
                "Unknown action '{}': expected approve or reject",
                other
            )),
        }
    }
}

/// Money handed over by a member. Only approved payments reduce dues.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub member_id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
}

/// Sum of approved payment amounts
pub fn approved_total<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Decimal {
    payments
        .into_iter()
        .filter(|p| p.is_approved())
        .map(|p| p.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(amount: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: 1,
            member_id: "m-1".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            amount: Decimal::from(amount),
            method: None,
            reference: None,
            status,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_approved_payments_count() {
        let payments = [
            payment(500, PaymentStatus::Approved),
            payment(300, PaymentStatus::Pending),
            payment(200, PaymentStatus::Rejected),
            payment(100, PaymentStatus::Approved),
        ];
        assert_eq!(approved_total(&payments), Decimal::from(600));
    }

    #[test]
    fn decision_parsing() {
        assert_eq!(
            "approve".parse::<PaymentDecision>().unwrap().resulting_status(),
            PaymentStatus::Approved
        );
        assert_eq!(
            "Rejected".parse::<PaymentDecision>().unwrap().resulting_status(),
            PaymentStatus::Rejected
        );
        assert!("refund".parse::<PaymentDecision>().is_err());
    }
}
