//! Database entities module

pub mod daily_meal;
pub mod expense;
pub mod member;
pub mod menu_day;
pub mod monthly_bill;
pub mod payment;
pub mod weekly_fee;

pub use daily_meal::Entity as DailyMeal;
pub use expense::Entity as Expense;
pub use member::Entity as Member;
pub use menu_day::Entity as MenuDay;
pub use monthly_bill::Entity as MonthlyBill;
pub use payment::Entity as Payment;
pub use weekly_fee::Entity as WeeklyFee;
