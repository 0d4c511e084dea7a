//! Payment API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{DecisionRequest, PaymentDto, SubmitPaymentRequest};
use crate::application::PaymentService;
use crate::domain::PaymentDecision;
use crate::interfaces::http::common::{
    bad_request, domain_error, ok, ApiError, ApiResponse, ApiResult, MonthParams, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Payments of the month. Members only see their own", body = ApiResponse<Vec<PaymentDto>>)
    )
)]
pub async fn list_payments(
    State(service): State<Arc<PaymentService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Vec<PaymentDto>> {
    let month = params.resolve()?;
    let entries = service
        .list_payments(&user.actor(), month)
        .await
        .map_err(domain_error)?;
    ok(entries.into_iter().map(PaymentDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = SubmitPaymentRequest,
    responses(
        (status = 201, description = "Payment submitted, pending approval", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Amount must be positive")
    )
)]
pub async fn submit_payment(
    State(service): State<Arc<PaymentService>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<SubmitPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentDto>>), ApiError> {
    let payment = service
        .submit_payment(&user.actor(), request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(payment.into())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/{id}/decision",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Payment approved or rejected", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Payment already decided")
    )
)]
pub async fn decide_payment(
    State(service): State<Arc<PaymentService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<DecisionRequest>,
) -> ApiResult<PaymentDto> {
    let decision: PaymentDecision = request.action.parse().map_err(bad_request)?;
    let payment = service
        .decide_payment(id, decision, &user.actor())
        .await
        .map_err(domain_error)?;
    ok(payment.into())
}
