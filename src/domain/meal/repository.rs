use async_trait::async_trait;
use chrono::NaiveDate;

use super::{DailyMealRecord, MealSelection};
use crate::domain::DomainResult;

#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Insert or replace the record for (member, date).
    async fn upsert(
        &self,
        member_id: &str,
        date: NaiveDate,
        meals: MealSelection,
    ) -> DomainResult<DailyMealRecord>;

    async fn find(&self, member_id: &str, date: NaiveDate)
        -> DomainResult<Option<DailyMealRecord>>;

    /// Records dated within `[from, to]`, optionally for one member,
    /// newest first.
    async fn find_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        member_id: Option<&str>,
    ) -> DomainResult<Vec<DailyMealRecord>>;
}
