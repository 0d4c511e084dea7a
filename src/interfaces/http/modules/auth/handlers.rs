//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Extension};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::application::MemberService;
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::members::MemberDto;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(service): State<Arc<MemberService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = service
        .login(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    ok(LoginResponse {
        token: result.token,
        token_type: result.token_type,
        expires_in: result.expires_in,
        member: result.member.into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current member", body = ApiResponse<MemberDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(service): State<Arc<MemberService>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<MemberDto> {
    let member = service
        .get_member(&user.member_id)
        .await
        .map_err(domain_error)?;
    ok(member.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Invalid current password"),
        (status = 422, description = "New password too short")
    )
)]
pub async fn change_password(
    State(service): State<Arc<MemberService>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    service
        .change_password(
            &user.member_id,
            &request.current_password,
            &request.new_password,
        )
        .await
        .map_err(domain_error)?;
    ok(())
}
