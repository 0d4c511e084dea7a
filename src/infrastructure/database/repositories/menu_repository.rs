use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::warn;

use super::db_err;
use crate::domain::menu::{
    parse_weekday_name, sort_week, MenuDay, MenuItems, MenuRepository, WeeklyFee,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{menu_day, weekly_fee};
use crate::shared::money::from_minor_units;

pub struct SeaOrmMenuRepository {
    db: DatabaseConnection,
}

impl SeaOrmMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn menu_model_to_domain(model: menu_day::Model) -> MenuDay {
    MenuDay {
        date: model.date,
        breakfast: model.breakfast,
        lunch: model.lunch,
        dinner: model.dinner,
    }
}

#[async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn upsert_day(&self, date: NaiveDate, items: MenuItems) -> DomainResult<MenuDay> {
        let row = menu_day::ActiveModel {
            date: Set(date),
            breakfast: Set(items.breakfast),
            lunch: Set(items.lunch),
            dinner: Set(items.dinner),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        menu_day::Entity::insert(row)
            .on_conflict(
                OnConflict::column(menu_day::Column::Date)
                    .update_columns([
                        menu_day::Column::Breakfast,
                        menu_day::Column::Lunch,
                        menu_day::Column::Dinner,
                        menu_day::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        menu_day::Entity::find()
            .filter(menu_day::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(menu_model_to_domain)
            .ok_or_else(|| DomainError::Storage(format!("Menu for {} vanished after upsert", date)))
    }

    async fn find_in_range(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<Vec<MenuDay>> {
        let models = menu_day::Entity::find()
            .filter(menu_day::Column::Date.between(from, to))
            .order_by_desc(menu_day::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(menu_model_to_domain).collect())
    }

    async fn weekly_fees(&self) -> DomainResult<Vec<WeeklyFee>> {
        let models = weekly_fee::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut fees: Vec<WeeklyFee> = models
            .into_iter()
            .filter_map(|m| match parse_weekday_name(&m.weekday) {
                Some(weekday) => Some(WeeklyFee {
                    weekday,
                    breakfast: from_minor_units(m.breakfast_fee),
                    lunch: from_minor_units(m.lunch_fee),
                    dinner: from_minor_units(m.dinner_fee),
                }),
                None => {
                    warn!(weekday = %m.weekday, "Skipping fee row with unknown weekday");
                    None
                }
            })
            .collect();
        sort_week(&mut fees);

        Ok(fees)
    }
}
