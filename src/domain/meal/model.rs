//! Daily meal records and per-member tallies

use chrono::NaiveDate;

/// The three meals served each day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// Which meals a member takes on a day. `true` means taken (billable),
/// `false` means cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealSelection {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl MealSelection {
    pub const ALL_TAKEN: MealSelection = MealSelection {
        breakfast: true,
        lunch: true,
        dinner: true,
    };

    /// Build a selection from cancellation checkboxes.
    pub fn from_cancellations(breakfast: bool, lunch: bool, dinner: bool) -> Self {
        Self {
            breakfast: !breakfast,
            lunch: !lunch,
            dinner: !dinner,
        }
    }

    pub fn is_taken(&self, slot: MealSlot) -> bool {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    pub fn taken_units(&self) -> i64 {
        MealSlot::ALL.iter().filter(|s| self.is_taken(**s)).count() as i64
    }

    pub fn cancelled_units(&self) -> i64 {
        MealSlot::ALL.len() as i64 - self.taken_units()
    }

    pub fn cancelled_slots(&self) -> Vec<MealSlot> {
        MealSlot::ALL
            .into_iter()
            .filter(|s| !self.is_taken(*s))
            .collect()
    }
}

/// One row per (member, date)
#[derive(Debug, Clone)]
pub struct DailyMealRecord {
    pub id: i32,
    pub member_id: String,
    pub date: NaiveDate,
    pub meals: MealSelection,
}

impl DailyMealRecord {
    pub fn has_cancellation(&self) -> bool {
        self.meals.cancelled_units() > 0
    }
}

/// Taken and cancelled meal-units over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealTally {
    pub taken: i64,
    pub cancelled: i64,
}

impl MealTally {
    pub fn add(&mut self, meals: &MealSelection) {
        self.taken += meals.taken_units();
        self.cancelled += meals.cancelled_units();
    }

    /// No meal rows were recorded at all.
    pub fn is_empty(&self) -> bool {
        self.taken == 0 && self.cancelled == 0
    }
}

impl<'a> FromIterator<&'a DailyMealRecord> for MealTally {
    fn from_iter<I: IntoIterator<Item = &'a DailyMealRecord>>(iter: I) -> Self {
        let mut tally = MealTally::default();
        for record in iter {
            tally.add(&record.meals);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(member: &str, day: u32, meals: MealSelection) -> DailyMealRecord {
        DailyMealRecord {
            id: day as i32,
            member_id: member.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            meals,
        }
    }

    #[test]
    fn cancellation_checkboxes_invert_into_taken_flags() {
        let meals = MealSelection::from_cancellations(true, false, true);
        assert!(!meals.breakfast);
        assert!(meals.lunch);
        assert!(!meals.dinner);
        assert_eq!(meals.taken_units(), 1);
        assert_eq!(meals.cancelled_units(), 2);
        assert_eq!(
            meals.cancelled_slots(),
            vec![MealSlot::Breakfast, MealSlot::Dinner]
        );
    }

    #[test]
    fn tally_counts_every_flag() {
        let records = [
            record("m-1", 1, MealSelection::ALL_TAKEN),
            record("m-1", 2, MealSelection::from_cancellations(false, true, false)),
            record("m-1", 3, MealSelection::from_cancellations(true, true, true)),
        ];

        let tally: MealTally = records.iter().collect();
        assert_eq!(tally, MealTally { taken: 5, cancelled: 4 });
        assert!(!tally.is_empty());
        assert!(records[1].has_cancellation());
        assert!(!records[0].has_cancellation());
    }

    #[test]
    fn empty_tally() {
        let tally: MealTally = std::iter::empty::<&DailyMealRecord>().collect();
        assert!(tally.is_empty());
    }
}
