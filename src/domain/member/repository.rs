use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Member, MemberFilter, MemberRole, NewMember};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member. Duplicate emails yield `DomainError::Conflict`.
    async fn create(&self, member: NewMember) -> DomainResult<Member>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Member>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>>;
    /// Newest first
    async fn list(&self, filter: MemberFilter) -> DomainResult<PaginatedResult<Member>>;
    /// Every member regardless of role or status, ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Member>>;
    async fn count_admins(&self) -> DomainResult<u64>;

    async fn update_role(&self, id: &str, role: MemberRole) -> DomainResult<Option<Member>>;
    async fn update_mess_start_date(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<Member>>;
    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Option<Member>>;
    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
}
