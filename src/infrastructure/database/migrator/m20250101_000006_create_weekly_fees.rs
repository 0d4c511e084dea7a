//! Create weekly_fees table and seed the default fee table

use sea_orm_migration::prelude::*;

/// (weekday, breakfast, lunch, dinner) in minor units
const DEFAULT_FEES: [(&str, i64, i64, i64); 7] = [
    ("Sunday", 1500, 4500, 4000),
    ("Monday", 2000, 4500, 4000),
    ("Tuesday", 2500, 4500, 4000),
    ("Wednesday", 2000, 5000, 4000),
    ("Thursday", 2000, 4500, 4500),
    ("Friday", 2000, 5000, 4000),
    ("Saturday", 2500, 4500, 4000),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeeklyFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeeklyFees::Weekday)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeeklyFees::BreakfastFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WeeklyFees::LunchFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WeeklyFees::DinnerFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(WeeklyFees::Table).columns([
            WeeklyFees::Weekday,
            WeeklyFees::BreakfastFee,
            WeeklyFees::LunchFee,
            WeeklyFees::DinnerFee,
        ]);
        for (weekday, breakfast, lunch, dinner) in DEFAULT_FEES {
            insert
                .values([
                    weekday.into(),
                    breakfast.into(),
                    lunch.into(),
                    dinner.into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeeklyFees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WeeklyFees {
    Table,
    Weekday,
    BreakfastFee,
    LunchFee,
    DinnerFee,
}
