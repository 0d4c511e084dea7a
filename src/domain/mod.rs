pub mod billing;
pub mod expense;
pub mod meal;
pub mod member;
pub mod menu;
pub mod payment;
pub mod repositories;

// Re-export commonly used types
pub use billing::{BillFigures, BillStatus, BillingMonth, MonthlyBill};
pub use expense::{Expense, NewExpense};
pub use meal::{DailyMealRecord, MealSelection, MealSlot, MealTally};
pub use member::{Member, MemberFilter, MemberRole, NewMember};
pub use menu::{MenuDay, MenuItems, WeeklyFee};
pub use payment::{NewPayment, Payment, PaymentDecision, PaymentStatus};
pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::errors::DomainError;
