//! Member domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Member role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(format!("Unknown role '{}': expected admin or member", other)),
        }
    }
}

/// A person eating at the mess
#[derive(Debug, Clone)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Lower-cased, unique
    pub email: String,
    pub password_hash: String,
    pub role: MemberRole,
    /// First day billing applies to this member
    pub mess_start_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// Active members with the `member` role get a monthly bill.
    pub fn is_billable(&self) -> bool {
        self.is_active && self.role == MemberRole::Member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!(" member ".parse::<MemberRole>().unwrap(), MemberRole::Member);
        assert!("cook".parse::<MemberRole>().is_err());
    }

    #[test]
    fn only_active_members_are_billable() {
        let now = Utc::now();
        let mut member = Member {
            id: "m-1".into(),
            name: "Rahim".into(),
            email: "rahim@mess.com".into(),
            password_hash: String::new(),
            role: MemberRole::Member,
            mess_start_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        assert!(member.is_billable());

        member.is_active = false;
        assert!(!member.is_billable());

        member.is_active = true;
        member.role = MemberRole::Admin;
        assert!(!member.is_billable());
    }
}
