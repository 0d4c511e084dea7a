//! Create daily_meals table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_members::Members;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyMeals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyMeals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyMeals::MemberId).string().not_null())
                    .col(ColumnDef::new(DailyMeals::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyMeals::Breakfast)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DailyMeals::Lunch)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DailyMeals::Dinner)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DailyMeals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_meals_member")
                            .from(DailyMeals::Table, DailyMeals::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_meals_member_date")
                    .table(DailyMeals::Table)
                    .col(DailyMeals::MemberId)
                    .col(DailyMeals::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_meals_date")
                    .table(DailyMeals::Table)
                    .col(DailyMeals::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyMeals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DailyMeals {
    Table,
    Id,
    MemberId,
    Date,
    Breakfast,
    Lunch,
    Dinner,
    UpdatedAt,
}
