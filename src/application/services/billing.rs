//! Monthly bill computation and statements
//!
//! Gathers the month's expenses, meal rows and payments, runs the pure
//! calculator in `domain::billing` and stores the snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::billing::{compute_bill, BillInputs};
use crate::domain::expense::total_amount;
use crate::domain::payment::approved_total;
use crate::domain::{
    BillingMonth, DailyMealRecord, DomainError, DomainResult, MealTally, Member, MonthlyBill,
    Payment, RepositoryProvider,
};
use crate::shared::{retry_with_backoff, RetryConfig};

/// Organization-wide figures shared by every bill of a month
#[derive(Debug, Clone, Copy)]
struct OrgTotals {
    expenses: Decimal,
    units: i64,
}

/// A bill with everything shown on a member's statement
#[derive(Debug, Clone)]
pub struct BillStatement {
    pub bill: MonthlyBill,
    pub member_name: String,
    pub mess_start_date: Option<NaiveDate>,
    /// All of the month's payments, oldest first, whatever their status
    pub payments: Vec<Payment>,
    /// The month's meal rows, oldest first
    pub meals: Vec<DailyMealRecord>,
}

/// A stored bill joined with its member
#[derive(Debug, Clone)]
pub struct MemberBill {
    pub bill: MonthlyBill,
    pub member_name: String,
    pub member_email: String,
    pub mess_start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillSummary {
    pub total_members: usize,
    pub total_billed: Decimal,
    pub total_paid: Decimal,
    pub total_due: Decimal,
}

impl BillSummary {
    fn from_bills(bills: &[MemberBill]) -> Self {
        bills.iter().fold(Self::default(), |mut acc, b| {
            acc.total_members += 1;
            acc.total_billed += b.bill.figures.total_amount;
            acc.total_paid += b.bill.figures.paid_amount;
            acc.total_due += b.bill.figures.due_amount;
            acc
        })
    }
}

/// Result of a bulk run
#[derive(Debug, Clone)]
pub struct MonthBills {
    pub month: BillingMonth,
    pub bills: Vec<MemberBill>,
    pub summary: BillSummary,
}

pub struct BillingService {
    repos: Arc<dyn RepositoryProvider>,
    retry: RetryConfig,
}

impl BillingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Recompute and store the bill for one member and month.
    ///
    /// A member without any data still gets a bill (the fallback units
    /// apply); only an unknown member is an error.
    pub async fn compute_bill(
        &self,
        member_id: &str,
        month: BillingMonth,
    ) -> DomainResult<MonthlyBill> {
        let member = self.find_member(member_id).await?;
        let totals = self.org_totals(month).await?;
        self.compute_for(&member, month, totals).await
    }

    pub async fn bill_statement(
        &self,
        member_id: &str,
        month: BillingMonth,
    ) -> DomainResult<BillStatement> {
        let member = self.find_member(member_id).await?;
        let totals = self.org_totals(month).await?;
        let bill = self.compute_for(&member, month, totals).await?;

        let mut payments = self
            .repos
            .payments()
            .find_in_range(month.first_day(), month.last_day(), Some(member.id.as_str()))
            .await?;
        payments.sort_by_key(|p| (p.date, p.id));

        let mut meals = self
            .repos
            .meals()
            .find_in_range(month.first_day(), month.last_day(), Some(member.id.as_str()))
            .await?;
        meals.sort_by_key(|m| m.date);

        Ok(BillStatement {
            bill,
            member_name: member.name,
            mess_start_date: member.mess_start_date,
            payments,
            meals,
        })
    }

    /// Compute bills for every active member and return those bills with a
    /// summary. Snapshots left over for deactivated members are not listed.
    pub async fn generate_month_bills(&self, month: BillingMonth) -> DomainResult<MonthBills> {
        let members = self.repos.members().find_all().await?;
        let totals = retry_with_backoff(&self.retry, "org_totals", DomainError::is_transient, || {
            self.org_totals(month)
        })
        .await?;

        let billable: Vec<&Member> = members.iter().filter(|m| m.is_billable()).collect();
        for member in &billable {
            retry_with_backoff(&self.retry, "compute_bill", DomainError::is_transient, || {
                self.compute_for(member, month, totals)
            })
            .await
            .inspect_err(|e| {
                warn!(member_id = %member.id, month = %month, error = %e, "Bill generation failed")
            })?;
        }

        let by_id: HashMap<&str, &Member> =
            billable.iter().map(|m| (m.id.as_str(), *m)).collect();
        let mut bills: Vec<MemberBill> = self
            .repos
            .bills()
            .find_for_month(month)
            .await?
            .into_iter()
            .filter_map(|bill| {
                let member = by_id.get(bill.member_id.as_str())?;
                Some(MemberBill {
                    member_name: member.name.clone(),
                    member_email: member.email.clone(),
                    mess_start_date: member.mess_start_date,
                    bill,
                })
            })
            .collect();
        bills.sort_by(|a, b| a.member_name.cmp(&b.member_name));

        let summary = BillSummary::from_bills(&bills);
        info!(
            month = %month,
            members = billable.len(),
            total_billed = %summary.total_billed,
            total_due = %summary.total_due,
            "Monthly bills generated"
        );

        Ok(MonthBills {
            month,
            bills,
            summary,
        })
    }

    async fn find_member(&self, member_id: &str) -> DomainResult<Member> {
        self.repos
            .members()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", member_id))
    }

    async fn org_totals(&self, month: BillingMonth) -> DomainResult<OrgTotals> {
        let (from, to) = (month.first_day(), month.last_day());
        let expenses = self.repos.expenses().find_in_range(from, to).await?;
        let meals = self.repos.meals().find_in_range(from, to, None).await?;
        let tally: MealTally = meals.iter().collect();

        Ok(OrgTotals {
            expenses: total_amount(&expenses),
            units: tally.taken,
        })
    }

    async fn compute_for(
        &self,
        member: &Member,
        month: BillingMonth,
        totals: OrgTotals,
    ) -> DomainResult<MonthlyBill> {
        let (from, to) = (month.first_day(), month.last_day());
        let meals = self
            .repos
            .meals()
            .find_in_range(from, to, Some(member.id.as_str()))
            .await?;
        let payments = self
            .repos
            .payments()
            .find_in_range(from, to, Some(member.id.as_str()))
            .await?;

        let figures = compute_bill(&BillInputs {
            month,
            mess_start_date: member.mess_start_date,
            total_expenses: totals.expenses,
            total_org_units: totals.units,
            member_meals: meals.iter().collect(),
            approved_payments: approved_total(&payments),
        });

        let bill = self.repos.bills().upsert(&member.id, month, &figures).await?;
        metrics::counter!("mess_bills_computed_total").increment(1);

        info!(
            member_id = %member.id,
            month = %month,
            billable_meals = bill.figures.billable_meals,
            meal_rate = %bill.figures.meal_rate,
            total_amount = %bill.figures.total_amount,
            due_amount = %bill.figures.due_amount,
            status = %bill.figures.status,
            "Bill computed"
        );
        Ok(bill)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::test_support::{date, repos, seed_member};
    use crate::domain::{
        BillStatus, MealSelection, MemberRole, NewExpense, NewPayment, PaymentStatus,
    };

    fn june() -> BillingMonth {
        "2024-06".parse().unwrap()
    }

    fn service(repos: Arc<dyn RepositoryProvider>) -> BillingService {
        BillingService::new(repos).with_retry(RetryConfig {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1),
            backoff_multiplier: 1.0,
            max_delay: Duration::from_millis(1),
        })
    }

    async fn add_expense(repos: &dyn RepositoryProvider, day: u32, amount: i64) {
        repos
            .expenses()
            .create(NewExpense {
                date: date(2024, 6, day),
                amount: Decimal::from(amount),
                category: None,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();
    }

    async fn add_meals(
        repos: &dyn RepositoryProvider,
        member_id: &str,
        days: u32,
        meals: MealSelection,
    ) {
        for day in 1..=days {
            repos
                .meals()
                .upsert(member_id, date(2024, 6, day), meals)
                .await
                .unwrap();
        }
    }

    /// The admin who decides payments in these tests, seeded on first use.
    async fn treasurer(repos: &dyn RepositoryProvider) -> Member {
        match repos.members().find_by_email("treasurer@mess.com").await.unwrap() {
            Some(admin) => admin,
            None => seed_member(repos, "Treasurer", MemberRole::Admin, None).await,
        }
    }

    async fn add_payment(
        repos: &dyn RepositoryProvider,
        member_id: &str,
        amount: i64,
        status: PaymentStatus,
    ) {
        let payment = repos
            .payments()
            .create(NewPayment {
                member_id: member_id.to_string(),
                date: date(2024, 6, 15),
                amount: Decimal::from(amount),
                method: None,
                reference: None,
            })
            .await
            .unwrap();
        if status != PaymentStatus::Pending {
            let approver = treasurer(repos).await;
            repos
                .payments()
                .update_status(payment.id, status, &approver.id, chrono::Utc::now())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn full_month_from_stored_rows() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        let karim = seed_member(repos.as_ref(), "Karim", MemberRole::Member, None).await;

        // 150 taken units in total: Rahim 60, Karim 90
        add_meals(repos.as_ref(), &rahim.id, 20, MealSelection::ALL_TAKEN).await;
        add_meals(repos.as_ref(), &karim.id, 30, MealSelection::ALL_TAKEN).await;
        add_expense(repos.as_ref(), 1, 4000).await;
        add_expense(repos.as_ref(), 20, 4100).await;
        add_payment(repos.as_ref(), &rahim.id, 1800, PaymentStatus::Approved).await;
        add_payment(repos.as_ref(), &rahim.id, 700, PaymentStatus::Pending).await;

        let bill = service(repos).compute_bill(&rahim.id, june()).await.unwrap();

        // 8100 / 150 units = 54
        assert_eq!(bill.figures.meal_rate, Decimal::from(54));
        assert_eq!(bill.figures.billable_meals, 60);
        assert_eq!(bill.figures.total_amount, Decimal::from(3240));
        assert_eq!(bill.figures.paid_amount, Decimal::from(1800));
        assert_eq!(bill.figures.due_amount, Decimal::from(1440));
        assert_eq!(bill.figures.status, BillStatus::Pending);
    }

    #[tokio::test]
    async fn recomputation_is_idempotent() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        let skip_lunch = MealSelection::from_cancellations(false, true, false);
        add_meals(repos.as_ref(), &rahim.id, 10, skip_lunch).await;
        add_expense(repos.as_ref(), 2, 1000).await;
        let service = service(repos.clone());

        let first = service.compute_bill(&rahim.id, june()).await.unwrap();
        let second = service.compute_bill(&rahim.id, june()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(repos.bills().find_for_month(june()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn member_without_rows_is_billed_from_mess_start() {
        let repos = repos().await;
        let late = seed_member(
            repos.as_ref(),
            "Late",
            MemberRole::Member,
            Some(date(2024, 6, 10)),
        )
        .await;
        let other = seed_member(repos.as_ref(), "Other", MemberRole::Member, None).await;
        add_meals(repos.as_ref(), &other.id, 10, MealSelection::ALL_TAKEN).await;
        add_expense(repos.as_ref(), 5, 600).await;

        let bill = service(repos).compute_bill(&late.id, june()).await.unwrap();
        assert_eq!(bill.figures.billable_meals, 63);
        assert_eq!(bill.figures.total_meals, 0);
        assert_eq!(bill.figures.meal_rate, Decimal::from(20));
        assert_eq!(bill.figures.total_amount, Decimal::from(1260));
    }

    #[tokio::test]
    async fn unknown_member_is_not_found() {
        let repos = repos().await;
        let err = service(repos).compute_bill("nobody", june()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Member", .. }));
    }

    #[tokio::test]
    async fn statement_lists_payments_and_meals_oldest_first() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        add_meals(repos.as_ref(), &rahim.id, 3, MealSelection::ALL_TAKEN).await;
        add_payment(repos.as_ref(), &rahim.id, 100, PaymentStatus::Rejected).await;
        add_payment(repos.as_ref(), &rahim.id, 200, PaymentStatus::Approved).await;

        let statement = service(repos).bill_statement(&rahim.id, june()).await.unwrap();
        assert_eq!(statement.member_name, "Rahim");
        assert_eq!(statement.payments.len(), 2);
        assert_eq!(statement.payments[0].amount, Decimal::from(100));
        assert_eq!(statement.meals.first().map(|m| m.date), Some(date(2024, 6, 1)));
        assert_eq!(statement.bill.figures.paid_amount, Decimal::from(200));
        assert_eq!(statement.bill.figures.meal_rate, Decimal::ZERO);
    }

    #[tokio::test]
    async fn reading_a_statement_stores_the_bill() {
        let repos = repos().await;
        let rahim = seed_member(repos.as_ref(), "Rahim", MemberRole::Member, None).await;
        add_meals(repos.as_ref(), &rahim.id, 2, MealSelection::ALL_TAKEN).await;
        add_expense(repos.as_ref(), 1, 600).await;
        assert!(repos.bills().find_for_month(june()).await.unwrap().is_empty());

        let statement = service(repos.clone())
            .bill_statement(&rahim.id, june())
            .await
            .unwrap();

        let stored = repos.bills().find_for_month(june()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], statement.bill);
    }

    #[tokio::test]
    async fn bulk_run_covers_active_members_only() {
        let repos = repos().await;
        let admin = seed_member(repos.as_ref(), "Boss", MemberRole::Admin, None).await;
        let zara = seed_member(repos.as_ref(), "Zara", MemberRole::Member, None).await;
        let amin = seed_member(repos.as_ref(), "Amin", MemberRole::Member, None).await;
        let gone = seed_member(repos.as_ref(), "Gone", MemberRole::Member, None).await;
        repos.members().set_active(&gone.id, false).await.unwrap();

        add_meals(repos.as_ref(), &zara.id, 10, MealSelection::ALL_TAKEN).await;
        add_meals(repos.as_ref(), &amin.id, 10, MealSelection::ALL_TAKEN).await;
        add_expense(repos.as_ref(), 1, 3000).await;
        add_payment(repos.as_ref(), &zara.id, 1500, PaymentStatus::Approved).await;

        let run = service(repos).generate_month_bills(june()).await.unwrap();

        let names: Vec<_> = run.bills.iter().map(|b| b.member_name.as_str()).collect();
        assert_eq!(names, vec!["Amin", "Zara"]);
        assert!(run.bills.iter().all(|b| b.bill.member_id != admin.id));
        assert_eq!(run.bills[0].member_email, "amin@mess.com");
        assert_eq!(
            run.summary,
            BillSummary {
                total_members: 2,
                total_billed: Decimal::from(3000),
                total_paid: Decimal::from(1500),
                total_due: Decimal::from(1500),
            }
        );
        assert_eq!(run.bills[1].bill.figures.status, BillStatus::Paid);
    }

    #[tokio::test]
    async fn deactivated_member_drops_out_of_the_next_run() {
        let repos = repos().await;
        let amin = seed_member(repos.as_ref(), "Amin", MemberRole::Member, None).await;
        let gone = seed_member(repos.as_ref(), "Gone", MemberRole::Member, None).await;
        add_meals(repos.as_ref(), &amin.id, 1, MealSelection::ALL_TAKEN).await;
        add_meals(repos.as_ref(), &gone.id, 1, MealSelection::ALL_TAKEN).await;
        add_expense(repos.as_ref(), 1, 600).await;
        let service = service(repos.clone());

        let first = service.generate_month_bills(june()).await.unwrap();
        assert_eq!(first.summary.total_members, 2);
        assert!(first
            .bills
            .iter()
            .all(|b| b.bill.figures.meal_rate == Decimal::from(100)));

        repos.members().set_active(&gone.id, false).await.unwrap();
        add_expense(repos.as_ref(), 2, 600).await;

        let second = service.generate_month_bills(june()).await.unwrap();
        let names: Vec<_> = second.bills.iter().map(|b| b.member_name.as_str()).collect();
        assert_eq!(names, vec!["Amin"]);
        assert_eq!(second.bills[0].bill.figures.meal_rate, Decimal::from(200));
        assert_eq!(second.summary.total_members, 1);
        assert_eq!(second.summary.total_billed, Decimal::from(600));
    }
}
