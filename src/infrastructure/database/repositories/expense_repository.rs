use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::expense::{Expense, ExpenseRepository, NewExpense};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::expense;
use crate::shared::money::{from_minor_units, to_minor_units};

pub struct SeaOrmExpenseRepository {
    db: DatabaseConnection,
}

impl SeaOrmExpenseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn expense_model_to_domain(model: expense::Model) -> Expense {
    Expense {
        id: model.id,
        date: model.date,
        amount: from_minor_units(model.amount),
        category: model.category,
        notes: model.notes,
        created_by: model.created_by,
        created_at: model.created_at,
    }
}

#[async_trait]
impl ExpenseRepository for SeaOrmExpenseRepository {
    async fn create(&self, new: NewExpense) -> DomainResult<Expense> {
        let row = expense::ActiveModel {
            date: Set(new.date),
            amount: Set(to_minor_units(new.amount)?),
            category: Set(new.category),
            notes: Set(new.notes),
            created_by: Set(new.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = row.insert(&self.db).await.map_err(db_err)?;
        Ok(expense_model_to_domain(inserted))
    }

    async fn find_in_range(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<Vec<Expense>> {
        let models = expense::Entity::find()
            .filter(expense::Column::Date.between(from, to))
            .order_by_desc(expense::Column::Date)
            .order_by_desc(expense::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(expense_model_to_domain).collect())
    }
}
