use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::{NewPayment, Payment, PaymentStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert with status `pending`.
    async fn create(&self, payment: NewPayment) -> DomainResult<Payment>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;
    /// Payments dated within `[from, to]`, optionally for one member,
    /// newest first
    async fn find_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        member_id: Option<&str>,
    ) -> DomainResult<Vec<Payment>>;
    async fn update_status(
        &self,
        id: i32,
        status: PaymentStatus,
        decided_by: &str,
        decided_at: DateTime<Utc>,
    ) -> DomainResult<Payment>;
}
