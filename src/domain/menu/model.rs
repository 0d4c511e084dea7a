//! Menu and weekday fee table

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::domain::meal::MealSlot;

/// Dishes served on one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDay {
    pub date: NaiveDate,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Menu text to store; empty strings are treated as "no menu"
#[derive(Debug, Clone, Default)]
pub struct MenuItems {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

impl MenuItems {
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            breakfast: clean(self.breakfast),
            lunch: clean(self.lunch),
            dinner: clean(self.dinner),
        }
    }
}

/// Per-meal price for one weekday. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyFee {
    pub weekday: Weekday,
    pub breakfast: Decimal,
    pub lunch: Decimal,
    pub dinner: Decimal,
}

impl WeeklyFee {
    pub fn fee_for(&self, slot: MealSlot) -> Decimal {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }
}

/// Weekdays in display order, Sunday first
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEK_ORDER
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(name.trim()))
}

/// The seven consecutive dates starting at `start`
pub fn week_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(7)
}

/// Sort fees Sunday first
pub fn sort_week(fees: &mut [WeeklyFee]) {
    fees.sort_by_key(|f| f.weekday.num_days_from_sunday());
}

/// Weekday of a date, as shown on reports
pub fn weekday_of(date: NaiveDate) -> &'static str {
    weekday_name(date.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_round_trip() {
        for day in WEEK_ORDER {
            assert_eq!(parse_weekday_name(weekday_name(day)), Some(day));
        }
        assert_eq!(parse_weekday_name("friday"), Some(Weekday::Fri));
        assert_eq!(parse_weekday_name("Funday"), None);
    }

    #[test]
    fn week_spans_seven_days_across_month_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let days: Vec<_> = week_from(start).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
    }

    #[test]
    fn blank_menu_text_is_dropped() {
        let items = MenuItems {
            breakfast: Some("  Paratha, egg ".into()),
            lunch: Some("   ".into()),
            dinner: None,
        }
        .normalized();
        assert_eq!(items.breakfast.as_deref(), Some("Paratha, egg"));
        assert_eq!(items.lunch, None);
    }

    #[test]
    fn fees_sort_sunday_first() {
        let fee = |weekday| WeeklyFee {
            weekday,
            breakfast: Decimal::ZERO,
            lunch: Decimal::ZERO,
            dinner: Decimal::ZERO,
        };
        let mut fees = vec![fee(Weekday::Sat), fee(Weekday::Mon), fee(Weekday::Sun)];
        sort_week(&mut fees);
        let order: Vec<_> = fees.iter().map(|f| f.weekday).collect();
        assert_eq!(order, vec![Weekday::Sun, Weekday::Mon, Weekday::Sat]);
    }
}
