use async_trait::async_trait;
use chrono::NaiveDate;

use super::{MenuDay, MenuItems, WeeklyFee};
use crate::domain::DomainResult;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Insert or replace the menu for one date.
    async fn upsert_day(&self, date: NaiveDate, items: MenuItems) -> DomainResult<MenuDay>;
    /// Menus dated within `[from, to]`, newest first
    async fn find_in_range(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<Vec<MenuDay>>;
    /// The fee table, Sunday first
    async fn weekly_fees(&self) -> DomainResult<Vec<WeeklyFee>>;
}
