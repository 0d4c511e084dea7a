use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::payment::{NewPayment, Payment, PaymentRepository, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;
use crate::shared::money::{from_minor_units, to_minor_units};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn status_to_domain(status: payment::PaymentStatus) -> PaymentStatus {
    match status {
        payment::PaymentStatus::Pending => PaymentStatus::Pending,
        payment::PaymentStatus::Approved => PaymentStatus::Approved,
        payment::PaymentStatus::Rejected => PaymentStatus::Rejected,
    }
}

fn status_to_entity(status: PaymentStatus) -> payment::PaymentStatus {
    match status {
        PaymentStatus::Pending => payment::PaymentStatus::Pending,
        PaymentStatus::Approved => payment::PaymentStatus::Approved,
        PaymentStatus::Rejected => payment::PaymentStatus::Rejected,
    }
}

fn payment_model_to_domain(model: payment::Model) -> Payment {
    Payment {
        id: model.id,
        member_id: model.member_id,
        date: model.date,
        amount: from_minor_units(model.amount),
        method: model.method,
        reference: model.reference,
        status: status_to_domain(model.status),
        approved_by: model.approved_by,
        approved_at: model.approved_at,
        created_at: model.created_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create(&self, new: NewPayment) -> DomainResult<Payment> {
        let row = payment::ActiveModel {
            member_id: Set(new.member_id),
            date: Set(new.date),
            amount: Set(to_minor_units(new.amount)?),
            method: Set(new.method),
            reference: Set(new.reference),
            status: Set(payment::PaymentStatus::Pending),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = row.insert(&self.db).await.map_err(db_err)?;
        Ok(payment_model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(payment_model_to_domain))
    }

    async fn find_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        member_id: Option<&str>,
    ) -> DomainResult<Vec<Payment>> {
        let mut query = payment::Entity::find().filter(payment::Column::Date.between(from, to));
        if let Some(member_id) = member_id {
            query = query.filter(payment::Column::MemberId.eq(member_id));
        }

        let models = query
            .order_by_desc(payment::Column::Date)
            .order_by_desc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(payment_model_to_domain).collect())
    }

    async fn update_status(
        &self,
        id: i32,
        status: PaymentStatus,
        decided_by: &str,
        decided_at: DateTime<Utc>,
    ) -> DomainResult<Payment> {
        let existing = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Payment", "id", id))?;

        let mut active: payment::ActiveModel = existing.into();
        active.status = Set(status_to_entity(status));
        active.approved_by = Set(Some(decided_by.to_string()));
        active.approved_at = Set(Some(decided_at));
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(payment_model_to_domain(updated))
    }
}
