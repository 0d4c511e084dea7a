//! Monthly bill arithmetic
//!
//! Pure functions over already-gathered inputs. Data gathering and the
//! upsert live in `application::billing`.
//!
//! - `meal_rate = total_expenses / total_org_units` (zero when no units)
//! - billable units are `taken + cancelled` (cancelled meals are still
//!   billed); a member with no rows at all is billed three meals for every
//!   day from `max(month_start, mess_start_date)` to month end
//! - `due = billable × rate − approved payments`, `paid` iff `due ≤ 0`

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{BillStatus, BillingMonth};
use crate::domain::meal::MealTally;
use crate::shared::money::round_money;

pub const MEALS_PER_DAY: i64 = 3;

/// Everything the bill depends on for one (member, month)
#[derive(Debug, Clone)]
pub struct BillInputs {
    pub month: BillingMonth,
    pub mess_start_date: Option<NaiveDate>,
    /// Organization-wide expenses dated within the month
    pub total_expenses: Decimal,
    /// Organization-wide taken meal-units within the month
    pub total_org_units: i64,
    /// The member's own taken/cancelled units within the month
    pub member_meals: MealTally,
    /// The member's approved payments dated within the month
    pub approved_payments: Decimal,
}

/// Derived bill values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillFigures {
    pub total_meals: i64,
    pub cancelled_meals: i64,
    pub billable_meals: i64,
    pub meal_rate: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub status: BillStatus,
}

/// Cost of one meal-unit this month, unrounded.
pub fn meal_rate(total_expenses: Decimal, total_org_units: i64) -> Decimal {
    if total_org_units <= 0 {
        return Decimal::ZERO;
    }
    total_expenses / Decimal::from(total_org_units)
}

/// Units billed to a member who has no meal rows in the month.
pub fn fallback_units(month: BillingMonth, mess_start_date: Option<NaiveDate>) -> i64 {
    let start = mess_start_date
        .map(|d| d.max(month.first_day()))
        .unwrap_or_else(|| month.first_day());
    let days = ((month.last_day() - start).num_days() + 1).max(0);
    days * MEALS_PER_DAY
}

pub fn compute_bill(inputs: &BillInputs) -> BillFigures {
    let tally = inputs.member_meals;
    let billable_meals = if tally.is_empty() {
        fallback_units(inputs.month, inputs.mess_start_date)
    } else {
        tally.taken + tally.cancelled
    };

    let rate = meal_rate(inputs.total_expenses, inputs.total_org_units);
    let total_amount = round_money(Decimal::from(billable_meals) * rate);
    let paid_amount = round_money(inputs.approved_payments);
    let due_amount = total_amount - paid_amount;

    BillFigures {
        total_meals: tally.taken,
        cancelled_meals: tally.cancelled,
        billable_meals,
        meal_rate: round_money(rate),
        total_amount,
        paid_amount,
        due_amount,
        status: BillStatus::from_due(due_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june() -> BillingMonth {
        "2024-06".parse().unwrap()
    }

    fn inputs(expenses: i64, org_units: i64, taken: i64, cancelled: i64, paid: i64) -> BillInputs {
        BillInputs {
            month: june(),
            mess_start_date: None,
            total_expenses: Decimal::from(expenses),
            total_org_units: org_units,
            member_meals: MealTally { taken, cancelled },
            approved_payments: Decimal::from(paid),
        }
    }

    #[test]
    fn full_month_scenario() {
        let bill = compute_bill(&inputs(9000, 300, 60, 0, 1800));

        assert_eq!(bill.meal_rate, Decimal::from(30));
        assert_eq!(bill.billable_meals, 60);
        assert_eq!(bill.total_amount, Decimal::from(1800));
        assert_eq!(bill.paid_amount, Decimal::from(1800));
        assert_eq!(bill.due_amount, Decimal::ZERO);
        assert_eq!(bill.status, BillStatus::Paid);
    }

    #[test]
    fn zero_org_units_means_zero_rate_and_amount() {
        let bill = compute_bill(&inputs(5000, 0, 0, 0, 0));
        assert_eq!(bill.meal_rate, Decimal::ZERO);
        assert_eq!(bill.total_amount, Decimal::ZERO);
        assert_eq!(bill.due_amount, Decimal::ZERO);
        assert_eq!(bill.status, BillStatus::Paid);
    }

    #[test]
    fn cancelled_meals_are_still_billed() {
        let all_taken = compute_bill(&inputs(9000, 300, 30, 0, 0));
        let half_cancelled = compute_bill(&inputs(9000, 300, 15, 15, 0));

        assert_eq!(all_taken.billable_meals, half_cancelled.billable_meals);
        assert_eq!(all_taken.total_amount, half_cancelled.total_amount);
        assert_eq!(half_cancelled.cancelled_meals, 15);
    }

    #[test]
    fn fallback_counts_days_from_mess_start() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(fallback_units(june(), Some(start)), 63);

        let bill = compute_bill(&BillInputs {
            mess_start_date: Some(start),
            ..inputs(9000, 300, 0, 0, 0)
        });
        assert_eq!(bill.billable_meals, 63);
        assert_eq!(bill.total_meals, 0);
        assert_eq!(bill.total_amount, Decimal::from(1890));
    }

    #[test]
    fn fallback_without_start_date_covers_whole_month() {
        assert_eq!(fallback_units(june(), None), 90);

        let before = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(fallback_units(june(), Some(before)), 90);
    }

    #[test]
    fn fallback_is_zero_when_membership_starts_after_month() {
        let later = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        assert_eq!(fallback_units(june(), Some(later)), 0);

        let last_day = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(fallback_units(june(), Some(last_day)), 3);
    }

    #[test]
    fn due_and_status() {
        // 30 units at 30 = 900
        let settled = compute_bill(&inputs(9000, 300, 30, 0, 900));
        assert_eq!(settled.total_amount, Decimal::from(900));
        assert_eq!(settled.status, BillStatus::Paid);

        let partial = compute_bill(&inputs(9000, 300, 30, 0, 500));
        assert_eq!(partial.due_amount, Decimal::from(400));
        assert_eq!(partial.status, BillStatus::Pending);

        let overpaid = compute_bill(&inputs(9000, 300, 30, 0, 1000));
        assert_eq!(overpaid.due_amount, Decimal::from(-100));
        assert_eq!(overpaid.status, BillStatus::Paid);
    }

    #[test]
    fn amounts_round_to_two_places() {
        // 1000 / 3 = 333.333..., 7 units -> 2333.33
        let bill = compute_bill(&inputs(1000, 3, 7, 0, 0));
        assert_eq!(bill.meal_rate, Decimal::new(33333, 2));
        assert_eq!(bill.total_amount, Decimal::new(233333, 2));
    }

    #[test]
    fn same_inputs_give_same_figures() {
        let a = compute_bill(&inputs(12345, 411, 58, 5, 700));
        let b = compute_bill(&inputs(12345, 411, 58, 5, 700));
        assert_eq!(a, b);
    }
}
