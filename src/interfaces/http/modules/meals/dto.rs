//! Meal DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{CancellationEntry, CancellationRequest, MealEntry};
use crate::domain::DailyMealRecord;

/// One member's meals on one date; `true` means the meal is taken
#[derive(Debug, Serialize, ToSchema)]
pub struct MealDto {
    pub id: i32,
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub date: NaiveDate,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl From<DailyMealRecord> for MealDto {
    fn from(r: DailyMealRecord) -> Self {
        Self {
            id: r.id,
            member_id: r.member_id,
            member_name: None,
            date: r.date,
            breakfast: r.meals.breakfast,
            lunch: r.meals.lunch,
            dinner: r.meals.dinner,
        }
    }
}

impl From<MealEntry> for MealDto {
    fn from(entry: MealEntry) -> Self {
        Self {
            member_name: Some(entry.member_name),
            ..entry.record.into()
        }
    }
}

/// Meals to skip tomorrow; `true` means cancelled
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CancellationRequestDto {
    /// Must be tomorrow's date
    pub date: NaiveDate,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
}

impl From<CancellationRequestDto> for CancellationRequest {
    fn from(dto: CancellationRequestDto) -> Self {
        Self {
            date: dto.date,
            breakfast: dto.breakfast,
            lunch: dto.lunch,
            dinner: dto.dinner,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancellationDto {
    pub member_id: String,
    pub member_name: String,
    pub date: NaiveDate,
    pub weekday: String,
    /// Cancelled slots: `breakfast`, `lunch`, `dinner`
    pub cancelled: Vec<String>,
    /// Weekday-fee value of the cancelled slots (informational)
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cancelled_value: Decimal,
}

impl From<CancellationEntry> for CancellationDto {
    fn from(e: CancellationEntry) -> Self {
        Self {
            member_id: e.member_id,
            member_name: e.member_name,
            date: e.date,
            weekday: e.weekday.to_string(),
            cancelled: e.cancelled.iter().map(|s| s.as_str().to_string()).collect(),
            cancelled_value: e.cancelled_value,
        }
    }
}
