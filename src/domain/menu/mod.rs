//! Menu aggregate

pub mod model;
pub mod repository;

pub use model::{
    parse_weekday_name, sort_week, week_from, weekday_name, weekday_of, MenuDay, MenuItems,
    WeeklyFee, WEEK_ORDER,
};
pub use repository::MenuRepository;
