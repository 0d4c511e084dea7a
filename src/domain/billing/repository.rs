use async_trait::async_trait;

use super::{BillFigures, BillingMonth, MonthlyBill};
use crate::domain::DomainResult;

#[async_trait]
pub trait MonthlyBillRepository: Send + Sync {
    /// Insert or overwrite the snapshot for (member, month).
    async fn upsert(
        &self,
        member_id: &str,
        month: BillingMonth,
        figures: &BillFigures,
    ) -> DomainResult<MonthlyBill>;

    async fn find(&self, member_id: &str, month: BillingMonth)
        -> DomainResult<Option<MonthlyBill>>;

    async fn find_for_month(&self, month: BillingMonth) -> DomainResult<Vec<MonthlyBill>>;
}
