//! Menu API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use chrono::{Local, NaiveDate};

use super::dto::{
    MenuDayDto, SaveMenuRequest, SaveWeekRequest, WeekDayDto, WeekParams, WeeklyFeeDto,
};
use crate::application::MenuService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiResponse, ApiResult, MonthParams, ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/api/v1/menu",
    tag = "Menu",
    security(("bearer_auth" = [])),
    params(MonthParams),
    responses(
        (status = 200, description = "Menus of the month, newest first", body = ApiResponse<Vec<MenuDayDto>>)
    )
)]
pub async fn list_month(
    State(service): State<Arc<MenuService>>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Vec<MenuDayDto>> {
    let month = params.resolve()?;
    let days = service.list_month(month).await.map_err(domain_error)?;
    ok(days.into_iter().map(MenuDayDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/week",
    tag = "Menu",
    security(("bearer_auth" = [])),
    params(WeekParams),
    responses(
        (status = 200, description = "Seven days of menu and fees", body = ApiResponse<Vec<WeekDayDto>>)
    )
)]
pub async fn week_view(
    State(service): State<Arc<MenuService>>,
    Query(params): Query<WeekParams>,
) -> ApiResult<Vec<WeekDayDto>> {
    let start = params.start.unwrap_or_else(|| Local::now().date_naive());
    let days = service.week_view(start).await.map_err(domain_error)?;
    ok(days.into_iter().map(WeekDayDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/fees",
    tag = "Menu",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Per-meal fee for each weekday, Sunday first", body = ApiResponse<Vec<WeeklyFeeDto>>)
    )
)]
pub async fn weekly_fees(State(service): State<Arc<MenuService>>) -> ApiResult<Vec<WeeklyFeeDto>> {
    let fees = service.weekly_fees().await.map_err(domain_error)?;
    ok(fees.into_iter().map(WeeklyFeeDto::from).collect())
}

#[utoipa::path(
    put,
    path = "/api/v1/menu/days/{date}",
    tag = "Menu",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Date as YYYY-MM-DD")),
    request_body = SaveMenuRequest,
    responses(
        (status = 200, description = "Menu saved", body = ApiResponse<MenuDayDto>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn save_day(
    State(service): State<Arc<MenuService>>,
    Path(date): Path<NaiveDate>,
    ValidatedJson(request): ValidatedJson<SaveMenuRequest>,
) -> ApiResult<MenuDayDto> {
    let saved = service
        .save_day(date, request.into())
        .await
        .map_err(domain_error)?;
    ok(saved.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/menu/week",
    tag = "Menu",
    security(("bearer_auth" = [])),
    request_body = SaveWeekRequest,
    responses(
        (status = 200, description = "Menu saved for seven days", body = ApiResponse<Vec<MenuDayDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn save_week(
    State(service): State<Arc<MenuService>>,
    ValidatedJson(request): ValidatedJson<SaveWeekRequest>,
) -> ApiResult<Vec<MenuDayDto>> {
    let saved = service
        .save_week(request.week_start, request.items.into())
        .await
        .map_err(domain_error)?;
    ok(saved.into_iter().map(MenuDayDto::from).collect())
}
