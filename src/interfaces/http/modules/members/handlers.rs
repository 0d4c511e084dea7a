//! Member management API handlers
//!
//! Admin-only endpoints. Delegates to `MemberService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateMemberRequest, ListMembersParams, MemberDto, MessStartDateRequest, UpdateRoleRequest,
};
use crate::application::{CreateMember, MemberService};
use crate::domain::{MemberFilter, MemberRole};
use crate::interfaces::http::common::{
    bad_request, domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse,
    ValidatedJson,
};

fn parse_role(role: &str) -> Result<MemberRole, ApiError> {
    role.parse().map_err(bad_request)
}

#[utoipa::path(
    get,
    path = "/api/v1/members",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(ListMembersParams),
    responses(
        (status = 200, description = "Member list", body = ApiResponse<PaginatedResponse<MemberDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_members(
    State(service): State<Arc<MemberService>>,
    Query(params): Query<ListMembersParams>,
) -> ApiResult<PaginatedResponse<MemberDto>> {
    let role = params.role.as_deref().map(parse_role).transpose()?;
    let filter = MemberFilter {
        search: params.search,
        role,
        is_active: params.is_active,
        page: params.page,
        limit: params.limit,
    };

    let page = service
        .list_members(filter)
        .await
        .map_err(domain_error)?
        .map(MemberDto::from);
    ok(PaginatedResponse::new(
        page.items,
        page.total,
        page.page,
        page.limit,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/members/{id}",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = ApiResponse<MemberDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_member(
    State(service): State<Arc<MemberService>>,
    Path(id): Path<String>,
) -> ApiResult<MemberDto> {
    let member = service.get_member(&id).await.map_err(domain_error)?;
    ok(member.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/members",
    tag = "Members",
    security(("bearer_auth" = [])),
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = ApiResponse<MemberDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_member(
    State(service): State<Arc<MemberService>>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MemberDto>>), ApiError> {
    let member = service
        .create_member(CreateMember {
            name: request.name,
            email: request.email,
            password: request.password,
            mess_start_date: request.mess_start_date,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(member.into())),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/members/{id}",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deactivated", body = ApiResponse<MemberDto>),
        (status = 403, description = "Admins cannot be removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_member(
    State(service): State<Arc<MemberService>>,
    Path(id): Path<String>,
) -> ApiResult<MemberDto> {
    let member = service.deactivate_member(&id).await.map_err(domain_error)?;
    ok(member.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/role",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Member ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<MemberDto>),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_role(
    State(service): State<Arc<MemberService>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<MemberDto> {
    let role = parse_role(&request.role)?;
    let member = service.update_role(&id, role).await.map_err(domain_error)?;
    ok(member.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/mess-start-date",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Member ID")),
    request_body = MessStartDateRequest,
    responses(
        (status = 200, description = "Mess start date updated", body = ApiResponse<MemberDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_mess_start_date(
    State(service): State<Arc<MemberService>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<MessStartDateRequest>,
) -> ApiResult<MemberDto> {
    let member = service
        .set_mess_start_date(&id, request.mess_start_date)
        .await
        .map_err(domain_error)?;
    ok(member.into())
}
