//! Create menu_days table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuDays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuDays::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuDays::Date).date().not_null())
                    .col(ColumnDef::new(MenuDays::Breakfast).text())
                    .col(ColumnDef::new(MenuDays::Lunch).text())
                    .col(ColumnDef::new(MenuDays::Dinner).text())
                    .col(
                        ColumnDef::new(MenuDays::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_days_date")
                    .table(MenuDays::Table)
                    .col(MenuDays::Date)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuDays::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum MenuDays {
    Table,
    Id,
    Date,
    Breakfast,
    Lunch,
    Dinner,
    UpdatedAt,
}
