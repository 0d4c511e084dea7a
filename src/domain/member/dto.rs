use chrono::NaiveDate;

use super::MemberRole;

/// Data needed to insert a member; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: MemberRole,
    pub mess_start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Matches name or email
    pub search: Option<String>,
    pub role: Option<MemberRole>,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
