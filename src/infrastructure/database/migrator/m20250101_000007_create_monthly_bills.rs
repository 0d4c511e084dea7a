//! Create monthly_bills table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_members::Members;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let counter = |col: MonthlyBills| {
            ColumnDef::new(col)
                .big_integer()
                .not_null()
                .default(0)
                .to_owned()
        };

        manager
            .create_table(
                Table::create()
                    .table(MonthlyBills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyBills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlyBills::MemberId).string().not_null())
                    .col(ColumnDef::new(MonthlyBills::Month).string_len(7).not_null())
                    .col(counter(MonthlyBills::TotalMeals))
                    .col(counter(MonthlyBills::CancelledMeals))
                    .col(counter(MonthlyBills::BillableMeals))
                    // money columns in minor units
                    .col(counter(MonthlyBills::MealRate))
                    .col(counter(MonthlyBills::TotalAmount))
                    .col(counter(MonthlyBills::PaidAmount))
                    .col(counter(MonthlyBills::DueAmount))
                    .col(
                        ColumnDef::new(MonthlyBills::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(MonthlyBills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_bills_member")
                            .from(MonthlyBills::Table, MonthlyBills::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_monthly_bills_member_month")
                    .table(MonthlyBills::Table)
                    .col(MonthlyBills::MemberId)
                    .col(MonthlyBills::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MonthlyBills::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
pub enum MonthlyBills {
    Table,
    Id,
    MemberId,
    Month,
    TotalMeals,
    CancelledMeals,
    BillableMeals,
    MealRate,
    TotalAmount,
    PaidAmount,
    DueAmount,
    Status,
    CreatedAt,
}
