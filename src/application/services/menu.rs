//! Daily menu and weekday fee table

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::domain::menu::{week_from, weekday_of};
use crate::domain::{BillingMonth, DomainResult, MenuDay, MenuItems, RepositoryProvider, WeeklyFee};

/// One day of the week view
#[derive(Debug, Clone)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub menu: Option<MenuDay>,
    pub fees: Option<WeeklyFee>,
}

pub struct MenuService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MenuService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn save_day(&self, date: NaiveDate, items: MenuItems) -> DomainResult<MenuDay> {
        let saved = self.repos.menu().upsert_day(date, items.normalized()).await?;
        info!(date = %date, "Menu saved");
        Ok(saved)
    }

    /// Apply the same menu to the seven days starting at `week_start`.
    pub async fn save_week(
        &self,
        week_start: NaiveDate,
        items: MenuItems,
    ) -> DomainResult<Vec<MenuDay>> {
        let items = items.normalized();
        let mut saved = Vec::with_capacity(7);
        for date in week_from(week_start) {
            saved.push(self.repos.menu().upsert_day(date, items.clone()).await?);
        }

        info!(week_start = %week_start, days = saved.len(), "Weekly menu saved");
        Ok(saved)
    }

    pub async fn list_month(&self, month: BillingMonth) -> DomainResult<Vec<MenuDay>> {
        self.repos
            .menu()
            .find_in_range(month.first_day(), month.last_day())
            .await
    }

    pub async fn week_view(&self, start: NaiveDate) -> DomainResult<Vec<WeekDay>> {
        let days: Vec<NaiveDate> = week_from(start).collect();
        let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
            return Ok(Vec::new());
        };

        let menus = self.repos.menu().find_in_range(first, last).await?;
        let fees = self.repos.menu().weekly_fees().await?;

        Ok(days
            .into_iter()
            .map(|date| WeekDay {
                date,
                weekday: weekday_of(date),
                menu: menus.iter().find(|m| m.date == date).cloned(),
                fees: fees.iter().find(|f| f.weekday == date.weekday()).cloned(),
            })
            .collect())
    }

    pub async fn weekly_fees(&self) -> DomainResult<Vec<WeeklyFee>> {
        self.repos.menu().weekly_fees().await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::application::test_support::{date, repos};

    fn items(breakfast: &str) -> MenuItems {
        MenuItems {
            breakfast: Some(breakfast.to_string()),
            lunch: Some("Rice, dal".into()),
            dinner: None,
        }
    }

    #[tokio::test]
    async fn fee_table_is_seeded_sunday_first() {
        let service = MenuService::new(repos().await);
        let fees = service.weekly_fees().await.unwrap();

        assert_eq!(fees.len(), 7);
        assert_eq!(fees[0].weekday, chrono::Weekday::Sun);
        assert_eq!(fees[0].breakfast, Decimal::from(15));
        assert_eq!(fees[3].lunch, Decimal::from(50));
        assert_eq!(fees[4].dinner, Decimal::from(45));
    }

    #[tokio::test]
    async fn saving_a_day_twice_replaces_it() {
        let service = MenuService::new(repos().await);
        let day = date(2024, 6, 3);

        service.save_day(day, items("Paratha")).await.unwrap();
        let saved = service.save_day(day, items("Khichuri")).await.unwrap();
        assert_eq!(saved.breakfast.as_deref(), Some("Khichuri"));

        let month = service.list_month("2024-06".parse().unwrap()).await.unwrap();
        assert_eq!(month.len(), 1);
    }

    #[tokio::test]
    async fn week_save_and_view_cross_month_end() {
        let service = MenuService::new(repos().await);
        let saved = service.save_week(date(2024, 6, 28), items("Bread")).await.unwrap();
        assert_eq!(saved.len(), 7);

        let view = service.week_view(date(2024, 6, 30)).await.unwrap();
        assert_eq!(view.len(), 7);
        assert_eq!(view[0].weekday, "Sunday");
        assert!(view[4].menu.is_some());
        assert!(view[5].menu.is_none());
        assert_eq!(view[0].fees.as_ref().map(|f| f.breakfast), Some(Decimal::from(15)));

        let june = service.list_month("2024-06".parse().unwrap()).await.unwrap();
        assert_eq!(june.len(), 3);
        assert_eq!(june[0].date, date(2024, 6, 30));
    }
}
