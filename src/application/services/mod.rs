//! Application services

mod billing;
mod expenses;
mod meals;
mod menu;
mod payments;

pub use billing::{BillStatement, BillSummary, BillingService, MemberBill, MonthBills};
pub use expenses::{ExpenseListing, ExpenseService, RecordExpense};
pub use meals::{CancellationEntry, CancellationRequest, MealEntry, MealService};
pub use menu::{MenuService, WeekDay};
pub use payments::{PaymentEntry, PaymentService, SubmitPayment};
