use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{BillFigures, BillingMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    /// Kept for stored rows; the calculator never assigns it.
    Overdue,
}

impl BillStatus {
    pub fn from_due(due: Decimal) -> Self {
        if due <= Decimal::ZERO {
            Self::Paid
        } else {
            Self::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored snapshot of a member's bill for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBill {
    pub id: i32,
    pub member_id: String,
    pub month: BillingMonth,
    pub figures: BillFigures,
    pub created_at: DateTime<Utc>,
}
