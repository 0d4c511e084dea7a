//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_members;
mod m20250101_000002_create_daily_meals;
mod m20250101_000003_create_expenses;
mod m20250101_000004_create_payments;
mod m20250101_000005_create_menu_days;
mod m20250101_000006_create_weekly_fees;
mod m20250101_000007_create_monthly_bills;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_members::Migration),
            Box::new(m20250101_000002_create_daily_meals::Migration),
            Box::new(m20250101_000003_create_expenses::Migration),
            Box::new(m20250101_000004_create_payments::Migration),
            Box::new(m20250101_000005_create_menu_days::Migration),
            Box::new(m20250101_000006_create_weekly_fees::Migration),
            Box::new(m20250101_000007_create_monthly_bills::Migration),
        ]
    }
}
