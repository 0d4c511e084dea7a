//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::billing::MonthlyBillRepository;
use super::expense::ExpenseRepository;
use super::meal::MealRepository;
use super::member::MemberRepository;
use super::menu::MenuRepository;
use super::payment::PaymentRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let member = repos.members().find_by_id("...").await?;
///     let meals = repos.meals().find_in_range(from, to, Some("...")).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn members(&self) -> &dyn MemberRepository;
    fn meals(&self) -> &dyn MealRepository;
    fn expenses(&self) -> &dyn ExpenseRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn menu(&self) -> &dyn MenuRepository;
    fn bills(&self) -> &dyn MonthlyBillRepository;
}
