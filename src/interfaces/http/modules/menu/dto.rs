//! Menu DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::WeekDay;
use crate::domain::menu::weekday_name;
use crate::domain::{MenuDay, MenuItems, WeeklyFee};

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuDayDto {
    pub date: NaiveDate,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

impl From<MenuDay> for MenuDayDto {
    fn from(m: MenuDay) -> Self {
        Self {
            date: m.date,
            breakfast: m.breakfast,
            lunch: m.lunch,
            dinner: m.dinner,
        }
    }
}

/// Dish text per meal; blank means nothing planned
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveMenuRequest {
    #[validate(length(max = 500))]
    pub breakfast: Option<String>,
    #[validate(length(max = 500))]
    pub lunch: Option<String>,
    #[validate(length(max = 500))]
    pub dinner: Option<String>,
}

impl From<SaveMenuRequest> for MenuItems {
    fn from(r: SaveMenuRequest) -> Self {
        Self {
            breakfast: r.breakfast,
            lunch: r.lunch,
            dinner: r.dinner,
        }
    }
}

/// The same dishes for seven days starting at `week_start`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveWeekRequest {
    pub week_start: NaiveDate,
    #[validate(nested)]
    pub items: SaveMenuRequest,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct WeekParams {
    /// First day of the week; today when omitted
    pub start: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyFeeDto {
    pub weekday: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub breakfast: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub lunch: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub dinner: Decimal,
}

impl From<WeeklyFee> for WeeklyFeeDto {
    fn from(f: WeeklyFee) -> Self {
        Self {
            weekday: weekday_name(f.weekday).to_string(),
            breakfast: f.breakfast,
            lunch: f.lunch,
            dinner: f.dinner,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekDayDto {
    pub date: NaiveDate,
    pub weekday: String,
    pub menu: Option<MenuDayDto>,
    pub fees: Option<WeeklyFeeDto>,
}

impl From<WeekDay> for WeekDayDto {
    fn from(d: WeekDay) -> Self {
        Self {
            date: d.date,
            weekday: d.weekday.to_string(),
            menu: d.menu.map(MenuDayDto::from),
            fees: d.fees.map(WeeklyFeeDto::from),
        }
    }
}
