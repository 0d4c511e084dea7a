//! Member payments and their approval

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::expenses::non_blank;
use crate::application::identity::Actor;
use crate::domain::{
    BillingMonth, DomainError, DomainResult, NewPayment, Payment, PaymentDecision, PaymentStatus,
    RepositoryProvider,
};
use crate::shared::money::require_positive_amount;

/// A payment together with the payer's name
#[derive(Debug, Clone)]
pub struct PaymentEntry {
    pub payment: Payment,
    pub member_name: String,
}

#[derive(Debug, Clone)]
pub struct SubmitPayment {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Record a payment made by the caller. It counts towards dues only
    /// after an admin approves it.
    pub async fn submit_payment(
        &self,
        actor: &Actor,
        input: SubmitPayment,
    ) -> DomainResult<Payment> {
        let amount = require_positive_amount(input.amount)?;
        let payment = self
            .repos
            .payments()
            .create(NewPayment {
                member_id: actor.member_id.clone(),
                date: input.date,
                amount,
                method: non_blank(input.method),
                reference: non_blank(input.reference),
            })
            .await?;

        info!(
            payment_id = payment.id,
            member_id = %payment.member_id,
            amount = %payment.amount,
            "Payment submitted"
        );
        Ok(payment)
    }

    pub async fn decide_payment(
        &self,
        id: i32,
        decision: PaymentDecision,
        actor: &Actor,
    ) -> DomainResult<Payment> {
        let payment = self
            .repos
            .payments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", "id", id))?;

        if payment.status != PaymentStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Payment {} is already {}",
                id, payment.status
            )));
        }

        let decided = self
            .repos
            .payments()
            .update_status(id, decision.resulting_status(), &actor.member_id, Utc::now())
            .await?;

        info!(
            payment_id = id,
            member_id = %decided.member_id,
            status = %decided.status,
            decided_by = %actor.member_id,
            "Payment decided"
        );
        Ok(decided)
    }

    /// Payments for the month. Admins see everyone, members themselves.
    pub async fn list_payments(
        &self,
        actor: &Actor,
        month: BillingMonth,
    ) -> DomainResult<Vec<PaymentEntry>> {
        let scope = (!actor.is_admin()).then_some(actor.member_id.as_str());
        let payments = self
            .repos
            .payments()
            .find_in_range(month.first_day(), month.last_day(), scope)
            .await?;

        let names: HashMap<String, String> = self
            .repos
            .members()
            .find_all()
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(payments
            .into_iter()
            .map(|payment| PaymentEntry {
                member_name: names.get(&payment.member_id).cloned().unwrap_or_default(),
                payment,
            })
            .collect())
    }
}
