//! Expense API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateExpenseRequest, ExpenseDto, ExpenseListDto};
use crate::application::ExpenseService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, MonthParams, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "Expenses",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Expenses of the month with total", body = ApiResponse<ExpenseListDto>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_expenses(
    State(service): State<Arc<ExpenseService>>,
    Query(params): Query<MonthParams>,
) -> ApiResult<ExpenseListDto> {
    let month = params.resolve()?;
    let listing = service.list_expenses(month).await.map_err(domain_error)?;
    ok(listing.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "Expenses",
    security(("bearer_auth" = [])),
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded", body = ApiResponse<ExpenseDto>),
        (status = 400, description = "Amount must be positive"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_expense(
    State(service): State<Arc<ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseDto>>), ApiError> {
    let expense = service
        .record_expense(&user.actor(), request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(expense.into())),
    ))
}
