//! Meal API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension,
};
use chrono::Local;

use super::dto::{CancellationDto, CancellationRequestDto, MealDto};
use crate::application::MealService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiResponse, ApiResult, MonthParams, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/meals",
    tag = "Meals",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Meal rows, newest first. Members only see their own", body = ApiResponse<Vec<MealDto>>),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn list_meals(
    State(service): State<Arc<MealService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Vec<MealDto>> {
    let month = params.resolve()?;
    let entries = service
        .list_meals(&user.actor(), month)
        .await
        .map_err(domain_error)?;
    ok(entries.into_iter().map(MealDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/meals/cancellations",
    tag = "Meals",
    security(("bearer_auth" = [])),
    request_body = CancellationRequestDto,
    responses(
        (status = 200, description = "Tomorrow's meals saved", body = ApiResponse<MealDto>),
        (status = 400, description = "Date is not tomorrow"),
        (status = 403, description = "Admins cannot cancel meals")
    )
)]
pub async fn submit_cancellation(
    State(service): State<Arc<MealService>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CancellationRequestDto>,
) -> ApiResult<MealDto> {
    let today = Local::now().date_naive();
    let record = service
        .submit_cancellation(&user.actor(), request.into(), today)
        .await
        .map_err(domain_error)?;
    ok(record.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/meals/cancellations",
    tag = "Meals",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Days with at least one cancelled meal", body = ApiResponse<Vec<CancellationDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn cancellation_report(
    State(service): State<Arc<MealService>>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Vec<CancellationDto>> {
    let month = params.resolve()?;
    let report = service
        .cancellation_report(month)
        .await
        .map_err(domain_error)?;
    ok(report.into_iter().map(CancellationDto::from).collect())
}
