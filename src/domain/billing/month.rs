//! Calendar month used as the billing period

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::shared::DomainError;

/// A `YYYY-MM` billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillingMonth {
    first_day: NaiveDate,
}

impl BillingMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for BillingMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_string());
        let token = s.trim();

        let (year, month) = token.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_and_formats() {
        let month: BillingMonth = "2024-06".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
        assert_eq!(month.to_string(), "2024-06");
        assert_eq!(month.first_day(), date(2024, 6, 1));
        assert_eq!(month.last_day(), date(2024, 6, 30));
    }

    #[test]
    fn month_end_handles_february_and_december() {
        let leap: BillingMonth = "2024-02".parse().unwrap();
        assert_eq!(leap.last_day(), date(2024, 2, 29));

        let plain: BillingMonth = "2023-02".parse().unwrap();
        assert_eq!(plain.last_day(), date(2023, 2, 28));

        let december: BillingMonth = "2023-12".parse().unwrap();
        assert_eq!(december.last_day(), date(2023, 12, 31));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["2024-13", "2024-00", "2024-6", "24-06", "2024/06", "June", "", "2024-06-01", "+024-06"] {
            let err = token.parse::<BillingMonth>().unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidMonth(_)),
                "{token:?} should be an invalid month"
            );
        }
    }

    #[test]
    fn containing_and_contains() {
        let month = BillingMonth::containing(date(2024, 3, 17));
        assert_eq!(month.to_string(), "2024-03");
        assert!(month.contains(date(2024, 3, 31)));
        assert!(!month.contains(date(2024, 4, 1)));
    }
}
