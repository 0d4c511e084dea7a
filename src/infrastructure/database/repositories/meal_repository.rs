use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use crate::domain::meal::{DailyMealRecord, MealRepository, MealSelection};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::daily_meal;

pub struct SeaOrmMealRepository {
    db: DatabaseConnection,
}

impl SeaOrmMealRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn meal_model_to_domain(model: daily_meal::Model) -> DailyMealRecord {
    DailyMealRecord {
        id: model.id,
        member_id: model.member_id,
        date: model.date,
        meals: MealSelection {
            breakfast: model.breakfast,
            lunch: model.lunch,
            dinner: model.dinner,
        },
    }
}

#[async_trait]
impl MealRepository for SeaOrmMealRepository {
    async fn upsert(
        &self,
        member_id: &str,
        date: NaiveDate,
        meals: MealSelection,
    ) -> DomainResult<DailyMealRecord> {
        let row = daily_meal::ActiveModel {
            member_id: Set(member_id.to_string()),
            date: Set(date),
            breakfast: Set(meals.breakfast),
            lunch: Set(meals.lunch),
            dinner: Set(meals.dinner),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        daily_meal::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([daily_meal::Column::MemberId, daily_meal::Column::Date])
                    .update_columns([
                        daily_meal::Column::Breakfast,
                        daily_meal::Column::Lunch,
                        daily_meal::Column::Dinner,
                        daily_meal::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        self.find(member_id, date).await?.ok_or_else(|| {
            DomainError::Storage(format!(
                "Meal record for {} on {} vanished after upsert",
                member_id, date
            ))
        })
    }

    async fn find(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<DailyMealRecord>> {
        let model = daily_meal::Entity::find()
            .filter(daily_meal::Column::MemberId.eq(member_id))
            .filter(daily_meal::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(meal_model_to_domain))
    }

    async fn find_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        member_id: Option<&str>,
    ) -> DomainResult<Vec<DailyMealRecord>> {
        let mut query = daily_meal::Entity::find()
            .filter(daily_meal::Column::Date.between(from, to));
        if let Some(member_id) = member_id {
            query = query.filter(daily_meal::Column::MemberId.eq(member_id));
        }

        let models = query
            .order_by_desc(daily_meal::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(meal_model_to_domain).collect())
    }
}
