//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::billing::MonthlyBillRepository;
use crate::domain::expense::ExpenseRepository;
use crate::domain::meal::MealRepository;
use crate::domain::member::MemberRepository;
use crate::domain::menu::MenuRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;

use super::bill_repository::SeaOrmMonthlyBillRepository;
use super::expense_repository::SeaOrmExpenseRepository;
use super::meal_repository::SeaOrmMealRepository;
use super::member_repository::SeaOrmMemberRepository;
use super::menu_repository::SeaOrmMenuRepository;
use super::payment_repository::SeaOrmPaymentRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let member = repos.members().find_by_email("rahim@mess.com").await?;
/// let bill = repos.bills().find(&member.id, month).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    members: SeaOrmMemberRepository,
    meals: SeaOrmMealRepository,
    expenses: SeaOrmExpenseRepository,
    payments: SeaOrmPaymentRepository,
    menu: SeaOrmMenuRepository,
    bills: SeaOrmMonthlyBillRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            members: SeaOrmMemberRepository::new(db.clone()),
            meals: SeaOrmMealRepository::new(db.clone()),
            expenses: SeaOrmExpenseRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            menu: SeaOrmMenuRepository::new(db.clone()),
            bills: SeaOrmMonthlyBillRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn members(&self) -> &dyn MemberRepository {
        &self.members
    }

    fn meals(&self) -> &dyn MealRepository {
        &self.meals
    }

    fn expenses(&self) -> &dyn ExpenseRepository {
        &self.expenses
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn menu(&self) -> &dyn MenuRepository {
        &self.menu
    }

    fn bills(&self) -> &dyn MonthlyBillRepository {
        &self.bills
    }
}
