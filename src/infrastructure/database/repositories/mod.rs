//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod bill_repository;
pub mod expense_repository;
pub mod meal_repository;
pub mod member_repository;
pub mod menu_repository;
pub mod payment_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::DbErr;

use crate::domain::DomainError;

pub(super) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Unique index violation, reported differently by each backend.
pub(super) fn unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("unique") || msg.contains("duplicate")
}
