//! Member DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Member;

/// Member API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `admin` or `member`
    pub role: String,
    pub mess_start_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Member> for MemberDto {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            role: m.role.as_str().to_string(),
            mess_start_date: m.mess_start_date,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login_at: m.last_login_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// First day the member eats at the mess; today when omitted
    pub mess_start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    /// `admin` or `member`
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MessStartDateRequest {
    pub mess_start_date: NaiveDate,
}

/// List members query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListMembersParams {
    /// Search by name or email
    pub search: Option<String>,
    /// Filter by role (admin, member)
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
