//! Meal opt-outs and the views built on them

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::application::identity::Actor;
use crate::domain::menu::weekday_of;
use crate::domain::{
    BillingMonth, DailyMealRecord, DomainError, DomainResult, MealSelection, MealSlot,
    RepositoryProvider,
};

/// A meal row together with the member's name
#[derive(Debug, Clone)]
pub struct MealEntry {
    pub record: DailyMealRecord,
    pub member_name: String,
}

/// One line of the admin cancellation report
#[derive(Debug, Clone)]
pub struct CancellationEntry {
    pub member_id: String,
    pub member_name: String,
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub cancelled: Vec<MealSlot>,
    /// What the cancelled slots would cost at the weekday fee table.
    /// Informational only, bills do not use it.
    pub cancelled_value: Decimal,
}

/// Checkboxes submitted by a member for one day
#[derive(Debug, Clone, Copy)]
pub struct CancellationRequest {
    pub date: NaiveDate,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

pub struct MealService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MealService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Record which of tomorrow's meals the member skips.
    ///
    /// `today` is passed in by the caller so the cut-off is testable.
    pub async fn submit_cancellation(
        &self,
        actor: &Actor,
        request: CancellationRequest,
        today: NaiveDate,
    ) -> DomainResult<DailyMealRecord> {
        if actor.is_admin() {
            return Err(DomainError::Forbidden(
                "Admins cannot submit meal cancellations".into(),
            ));
        }

        let tomorrow = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DomainError::Validation("Date out of range".into()))?;
        if request.date != tomorrow {
            return Err(DomainError::Validation(format!(
                "Cancellations are only accepted for tomorrow ({})",
                tomorrow
            )));
        }

        self.repos
            .members()
            .find_by_id(&actor.member_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", &actor.member_id))?;

        let meals =
            MealSelection::from_cancellations(request.breakfast, request.lunch, request.dinner);
        let record = self
            .repos
            .meals()
            .upsert(&actor.member_id, request.date, meals)
            .await?;

        info!(
            member_id = %actor.member_id,
            date = %request.date,
            cancelled = record.meals.cancelled_units(),
            "Meal cancellation saved"
        );
        Ok(record)
    }

    /// Meal rows for the month. Admins see everyone, members themselves.
    pub async fn list_meals(
        &self,
        actor: &Actor,
        month: BillingMonth,
    ) -> DomainResult<Vec<MealEntry>> {
        let scope = (!actor.is_admin()).then_some(actor.member_id.as_str());
        let records = self
            .repos
            .meals()
            .find_in_range(month.first_day(), month.last_day(), scope)
            .await?;

        let names = self.member_names().await?;
        let mut entries: Vec<MealEntry> = records
            .into_iter()
            .map(|record| MealEntry {
                member_name: names.get(&record.member_id).cloned().unwrap_or_default(),
                record,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.record
                .date
                .cmp(&a.record.date)
                .then_with(|| a.member_name.cmp(&b.member_name))
        });

        Ok(entries)
    }

    /// Days in the month on which someone skipped at least one meal
    pub async fn cancellation_report(
        &self,
        month: BillingMonth,
    ) -> DomainResult<Vec<CancellationEntry>> {
        let records = self
            .repos
            .meals()
            .find_in_range(month.first_day(), month.last_day(), None)
            .await?;
        let names = self.member_names().await?;
        let fees = self.repos.menu().weekly_fees().await?;

        let mut report: Vec<CancellationEntry> = records
            .into_iter()
            .filter(DailyMealRecord::has_cancellation)
            .map(|record| {
                let cancelled = record.meals.cancelled_slots();
                let fee = fees.iter().find(|f| f.weekday == record.date.weekday());
                let cancelled_value = fee
                    .map(|f| cancelled.iter().map(|slot| f.fee_for(*slot)).sum())
                    .unwrap_or(Decimal::ZERO);

                CancellationEntry {
                    member_name: names.get(&record.member_id).cloned().unwrap_or_default(),
                    member_id: record.member_id,
                    date: record.date,
                    weekday: weekday_of(record.date),
                    cancelled,
                    cancelled_value,
                }
            })
            .collect();
        report.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.member_name.cmp(&b.member_name))
        });

        Ok(report)
    }

    async fn member_names(&self) -> DomainResult<HashMap<String, String>> {
        Ok(self
            .repos
            .members()
            .find_all()
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{date, repos, seed_member};
    use crate::domain::MemberRole;

    fn june() -> BillingMonth {
        "2024-06".parse().unwrap()
    }

    fn cancel(date: NaiveDate, breakfast: bool, lunch: bool, dinner: bool) -> CancellationRequest {
        CancellationRequest {
            date,
            breakfast,
            lunch,
            dinner,
        }
    }

    #[tokio::test]
    async fn members_may_only_cancel_tomorrow() {
        let repos = repos().await;
        let member = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        let actor = Actor::new(&member.id, MemberRole::Member);
        let service = MealService::new(repos);
        let today = date(2024, 6, 14);

        let record = service
            .submit_cancellation(&actor, cancel(date(2024, 6, 15), true, false, false), today)
            .await
            .unwrap();
        assert!(!record.meals.breakfast);
        assert!(record.meals.lunch && record.meals.dinner);

        for day in [date(2024, 6, 14), date(2024, 6, 16)] {
            let err = service
                .submit_cancellation(&actor, cancel(day, true, true, true), today)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn resubmitting_replaces_the_day() {
        let repos = repos().await;
        let member = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        let actor = Actor::new(&member.id, MemberRole::Member);
        let service = MealService::new(repos.clone());
        let today = date(2024, 6, 14);
        let tomorrow = date(2024, 6, 15);

        service
            .submit_cancellation(&actor, cancel(tomorrow, true, true, true), today)
            .await
            .unwrap();
        service
            .submit_cancellation(&actor, cancel(tomorrow, false, false, true), today)
            .await
            .unwrap();

        let rows = repos
            .meals()
            .find_in_range(tomorrow, tomorrow, Some(member.id.as_str()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meals, MealSelection::from_cancellations(false, false, true));
    }

    #[tokio::test]
    async fn admins_are_view_only() {
        let repos = repos().await;
        let admin = seed_member(repos.as_ref(), "Boss", MemberRole::Admin, None).await;
        let service = MealService::new(repos);

        let err = service
            .submit_cancellation(
                &Actor::new(&admin.id, MemberRole::Admin),
                cancel(date(2024, 6, 15), true, false, false),
                date(2024, 6, 14),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn listing_is_scoped_and_ordered() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        let karim = seed_member(repos.as_ref(), "Karim", MemberRole::Member, None).await;
        let admin = seed_member(repos.as_ref(), "Boss", MemberRole::Admin, None).await;
        for (member, day) in [(&rahim, 3), (&karim, 3), (&rahim, 5)] {
            repos
                .meals()
                .upsert(&member.id, date(2024, 6, day), MealSelection::ALL_TAKEN)
                .await
                .unwrap();
        }
        let service = MealService::new(repos);

        let all = service
            .list_meals(&Actor::new(&admin.id, MemberRole::Admin), june())
            .await
            .unwrap();
        let order: Vec<_> = all
            .iter()
            .map(|e| (e.record.date.format("%d").to_string(), e.member_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("05".to_string(), "Rahim"),
                ("03".to_string(), "Karim"),
                ("03".to_string(), "Rahim"),
            ]
        );

        let own = service
            .list_meals(&Actor::new(&karim.id, MemberRole::Member), june())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].record.member_id, karim.id);
    }

    #[tokio::test]
    async fn report_prices_cancelled_slots_by_weekday() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        // 2024-06-02 is a Sunday: breakfast 15, dinner 40
        repos
            .meals()
            .upsert(
                &rahim.id,
                date(2024, 6, 2),
                MealSelection::from_cancellations(true, false, true),
            )
            .await
            .unwrap();
        repos
            .meals()
            .upsert(&rahim.id, date(2024, 6, 3), MealSelection::ALL_TAKEN)
            .await
            .unwrap();
        let service = MealService::new(repos);

        let report = service.cancellation_report(june()).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].weekday, "Sunday");
        assert_eq!(report[0].member_name, "Rahim");
        assert_eq!(report[0].cancelled, vec![MealSlot::Breakfast, MealSlot::Dinner]);
        assert_eq!(report[0].cancelled_value, Decimal::from(55));
    }
}
