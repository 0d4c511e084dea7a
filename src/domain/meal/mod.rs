//! Meal aggregate
//!
//! Daily opt-out records and the taken/cancelled tallies billing is built on.

pub mod model;
pub mod repository;

pub use model::{DailyMealRecord, MealSelection, MealSlot, MealTally};
pub use repository::MealRepository;
