use crate::domain::MemberRole;

/// The authenticated member on whose behalf a use-case runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub member_id: String,
    pub role: MemberRole,
}

impl Actor {
    pub fn new(member_id: impl Into<String>, role: MemberRole) -> Self {
        Self {
            member_id: member_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// Admins may see anyone's data, members only their own.
    pub fn can_access(&self, member_id: &str) -> bool {
        self.is_admin() || self.member_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_only_reach_their_own_data() {
        let member = Actor::new("m-1", MemberRole::Member);
        assert!(member.can_access("m-1"));
        assert!(!member.can_access("m-2"));

        let admin = Actor::new("a-1", MemberRole::Admin);
        assert!(admin.can_access("m-2"));
    }
}
