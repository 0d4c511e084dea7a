pub mod identity;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types for convenience
pub use identity::{Actor, AuthResult, CreateMember, MemberService};
pub use services::{
    BillStatement, BillSummary, BillingService, CancellationEntry, CancellationRequest,
    ExpenseListing, ExpenseService, MealEntry, MealService, MemberBill, MenuService, MonthBills,
    PaymentEntry, PaymentService, RecordExpense, SubmitPayment, WeekDay,
};
