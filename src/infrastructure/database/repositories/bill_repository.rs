use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use crate::domain::billing::{
    BillFigures, BillStatus, BillingMonth, MonthlyBill, MonthlyBillRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::monthly_bill;
use crate::shared::money::{from_minor_units, to_minor_units};

pub struct SeaOrmMonthlyBillRepository {
    db: DatabaseConnection,
}

impl SeaOrmMonthlyBillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn status_to_domain(status: monthly_bill::BillStatus) -> BillStatus {
    match status {
        monthly_bill::BillStatus::Pending => BillStatus::Pending,
        monthly_bill::BillStatus::Paid => BillStatus::Paid,
        monthly_bill::BillStatus::Overdue => BillStatus::Overdue,
    }
}

fn status_to_entity(status: BillStatus) -> monthly_bill::BillStatus {
    match status {
        BillStatus::Pending => monthly_bill::BillStatus::Pending,
        BillStatus::Paid => monthly_bill::BillStatus::Paid,
        BillStatus::Overdue => monthly_bill::BillStatus::Overdue,
    }
}

fn bill_model_to_domain(model: monthly_bill::Model) -> DomainResult<MonthlyBill> {
    let month: BillingMonth = model.month.parse().map_err(|_| {
        DomainError::Storage(format!(
            "Stored bill {} has bad month '{}'",
            model.id, model.month
        ))
    })?;

    Ok(MonthlyBill {
        id: model.id,
        member_id: model.member_id,
        month,
        figures: BillFigures {
            total_meals: model.total_meals,
            cancelled_meals: model.cancelled_meals,
            billable_meals: model.billable_meals,
            meal_rate: from_minor_units(model.meal_rate),
            total_amount: from_minor_units(model.total_amount),
            paid_amount: from_minor_units(model.paid_amount),
            due_amount: from_minor_units(model.due_amount),
            status: status_to_domain(model.status),
        },
        created_at: model.created_at,
    })
}

#[async_trait]
impl MonthlyBillRepository for SeaOrmMonthlyBillRepository {
    async fn upsert(
        &self,
        member_id: &str,
        month: BillingMonth,
        figures: &BillFigures,
    ) -> DomainResult<MonthlyBill> {
        let row = monthly_bill::ActiveModel {
            member_id: Set(member_id.to_string()),
            month: Set(month.to_string()),
            total_meals: Set(figures.total_meals),
            cancelled_meals: Set(figures.cancelled_meals),
            billable_meals: Set(figures.billable_meals),
            meal_rate: Set(to_minor_units(figures.meal_rate)?),
            total_amount: Set(to_minor_units(figures.total_amount)?),
            paid_amount: Set(to_minor_units(figures.paid_amount)?),
            due_amount: Set(to_minor_units(figures.due_amount)?),
            status: Set(status_to_entity(figures.status)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        // created_at keeps the first computation time
        monthly_bill::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([monthly_bill::Column::MemberId, monthly_bill::Column::Month])
                    .update_columns([
                        monthly_bill::Column::TotalMeals,
                        monthly_bill::Column::CancelledMeals,
                        monthly_bill::Column::BillableMeals,
                        monthly_bill::Column::MealRate,
                        monthly_bill::Column::TotalAmount,
                        monthly_bill::Column::PaidAmount,
                        monthly_bill::Column::DueAmount,
                        monthly_bill::Column::Status,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        self.find(member_id, month).await?.ok_or_else(|| {
            DomainError::Storage(format!(
                "Bill for {} in {} vanished after upsert",
                member_id, month
            ))
        })
    }

    async fn find(
        &self,
        member_id: &str,
        month: BillingMonth,
    ) -> DomainResult<Option<MonthlyBill>> {
        monthly_bill::Entity::find()
            .filter(monthly_bill::Column::MemberId.eq(member_id))
            .filter(monthly_bill::Column::Month.eq(month.to_string()))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(bill_model_to_domain)
            .transpose()
    }

    async fn find_for_month(&self, month: BillingMonth) -> DomainResult<Vec<MonthlyBill>> {
        monthly_bill::Entity::find()
            .filter(monthly_bill::Column::Month.eq(month.to_string()))
            .order_by_asc(monthly_bill::Column::MemberId)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(bill_model_to_domain)
            .collect()
    }
}
