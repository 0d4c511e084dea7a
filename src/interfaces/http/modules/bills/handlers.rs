//! Bill API handlers
//!
//! Every read recomputes the bill first, so the figures always reflect the
//! current expenses, meals and approved payments. These GETs are not
//! side-effect free: each one upserts the member's stored bill for the month.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::dto::{MonthBillsDto, StatementDto};
use crate::application::BillingService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult, MonthParams};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/bills",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Bills for every active member with totals", body = ApiResponse<MonthBillsDto>),
        (status = 400, description = "Invalid month"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn generate_month_bills(
    State(service): State<Arc<BillingService>>,
    Query(params): Query<MonthParams>,
) -> ApiResult<MonthBillsDto> {
    let month = params.resolve()?;
    let bills = service
        .generate_month_bills(month)
        .await
        .map_err(domain_error)?;
    ok(bills.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/me",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "The caller's statement", body = ApiResponse<StatementDto>),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn my_bill(
    State(service): State<Arc<BillingService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<MonthParams>,
) -> ApiResult<StatementDto> {
    let month = params.resolve()?;
    let statement = service
        .bill_statement(&user.member_id, month)
        .await
        .map_err(domain_error)?;
    ok(statement.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{member_id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("member_id" = String, Path, description = "Member ID"),
        MonthParams
    ),
    responses(
        (status = 200, description = "The member's statement", body = ApiResponse<StatementDto>),
        (status = 403, description = "Members may only view their own bill"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_bill(
    State(service): State<Arc<BillingService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(member_id): Path<String>,
    Query(params): Query<MonthParams>,
) -> ApiResult<StatementDto> {
    if !user.can_access(&member_id) {
        return Err(domain_error(DomainError::Forbidden(
            "Members may only view their own bill".into(),
        )));
    }

    let month = params.resolve()?;
    let statement = service
        .bill_statement(&member_id, month)
        .await
        .map_err(domain_error)?;
    ok(statement.into())
}
