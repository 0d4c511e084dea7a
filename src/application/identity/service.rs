//! Member management service, application-layer orchestration
//!
//! All member-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::AdminConfig;
use crate::domain::{
    DomainError, DomainResult, Member, MemberFilter, MemberRole, NewMember, RepositoryProvider,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::{normalize_email, PaginatedResult};

const MIN_PASSWORD_LEN: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub member: Member,
}

/// Input for enrolling a member
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to today
    pub mess_start_date: Option<NaiveDate>,
}

pub struct MemberService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl MemberService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let Some(member) = self.repos.members().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !member.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        if !verify_password(password, &member.password_hash) {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(
            &member.id,
            &member.name,
            &member.email,
            member.role.as_str(),
            &self.jwt_config,
        )
        .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        self.repos.members().touch_last_login(&member.id).await?;

        info!(member_id = %member.id, role = %member.role, "Member logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            member,
        })
    }

    // ── Enrollment ──────────────────────────────────────────────

    /// Enroll a new member with role `member`.
    pub async fn create_member(&self, input: CreateMember) -> DomainResult<Member> {
        let start = input
            .mess_start_date
            .unwrap_or_else(|| Local::now().date_naive());
        let member = self
            .insert(
                &input.name,
                &input.email,
                &input.password,
                MemberRole::Member,
                Some(start),
            )
            .await?;

        info!(
            member_id = %member.id,
            email = %member.email,
            mess_start_date = %start,
            "Member created"
        );
        Ok(member)
    }

    /// Create the configured administrator when no admin exists yet.
    /// Returns the new admin, or `None` when one was already present.
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<Option<Member>> {
        if self.repos.members().count_admins().await? > 0 {
            return Ok(None);
        }

        let member = self
            .insert(
                &admin.name,
                &admin.email,
                &admin.password,
                MemberRole::Admin,
                None,
            )
            .await?;

        info!(member_id = %member.id, email = %member.email, "Default admin created");
        Ok(Some(member))
    }

    async fn insert(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: MemberRole,
        mess_start_date: Option<NaiveDate>,
    ) -> DomainResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.repos.members().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        self.repos
            .members()
            .create(NewMember {
                name: name.to_string(),
                email,
                password_hash: hash_password(password)?,
                role,
                mess_start_date,
            })
            .await
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_members(&self, filter: MemberFilter) -> DomainResult<PaginatedResult<Member>> {
        self.repos.members().list(filter).await
    }

    pub async fn get_member(&self, id: &str) -> DomainResult<Member> {
        self.repos
            .members()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn update_role(&self, id: &str, role: MemberRole) -> DomainResult<Member> {
        let member = self
            .repos
            .members()
            .update_role(id, role)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", id))?;

        info!(member_id = %id, role = %role, "Member role updated");
        Ok(member)
    }

    pub async fn set_mess_start_date(&self, id: &str, date: NaiveDate) -> DomainResult<Member> {
        let member = self
            .repos
            .members()
            .update_mess_start_date(id, date)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", id))?;

        info!(member_id = %id, mess_start_date = %date, "Mess start date updated");
        Ok(member)
    }

    /// Soft-delete a member. Admin accounts cannot be removed this way.
    pub async fn deactivate_member(&self, id: &str) -> DomainResult<Member> {
        let member = self.get_member(id).await?;
        if member.is_admin() {
            return Err(DomainError::Forbidden(
                "Admin accounts cannot be removed".into(),
            ));
        }

        let member = self
            .repos
            .members()
            .set_active(id, false)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", "id", id))?;

        info!(member_id = %id, "Member deactivated");
        Ok(member)
    }

    /// Change a member's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        member_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let member = self.get_member(member_id).await?;
        if !verify_password(current_password, &member.password_hash) {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)?;
        self.repos
            .members()
            .update_password(member_id, &new_hash)
            .await?;

        info!(member_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;

    async fn service() -> MemberService {
        MemberService::new(test_support::repos().await, JwtConfig::default())
    }

    fn rahim() -> CreateMember {
        CreateMember {
            name: "Rahim".into(),
            email: " Rahim@Mess.com ".into(),
            password: "secret-pass".into(),
            mess_start_date: NaiveDate::from_ymd_opt(2024, 6, 10),
        }
    }

    #[tokio::test]
    async fn created_member_can_log_in_with_any_email_case() {
        let service = service().await;
        let member = service.create_member(rahim()).await.unwrap();
        assert_eq!(member.email, "rahim@mess.com");
        assert_eq!(member.role, MemberRole::Member);
        assert_eq!(member.mess_start_date, NaiveDate::from_ymd_opt(2024, 6, 10));

        let auth = service.login("RAHIM@mess.com", "secret-pass").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.member.id, member.id);
        assert!(!auth.token.is_empty());

        let reloaded = service.get_member(&member.id).await.unwrap();
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = service().await;
        service.create_member(rahim()).await.unwrap();

        let err = service.create_member(rahim()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let service = service().await;
        let err = service
            .create_member(CreateMember {
                password: "short".into(),
                ..rahim()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_disabled_accounts_are_unauthorized() {
        let service = service().await;
        let member = service.create_member(rahim()).await.unwrap();

        let err = service.login("rahim@mess.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m == "Invalid credentials"));

        service.deactivate_member(&member.id).await.unwrap();
        let err = service.login("rahim@mess.com", "secret-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m == "Account is disabled"));
    }

    #[tokio::test]
    async fn default_admin_is_created_once_and_cannot_be_removed() {
        let service = service().await;
        let config = AdminConfig::default();

        let admin = service.ensure_default_admin(&config).await.unwrap().unwrap();
        assert!(admin.is_admin());
        assert!(service.ensure_default_admin(&config).await.unwrap().is_none());

        let err = service.deactivate_member(&admin.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn change_password_requires_the_current_one() {
        let service = service().await;
        let member = service.create_member(rahim()).await.unwrap();

        let err = service
            .change_password(&member.id, "not-it", "brand-new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        service
            .change_password(&member.id, "secret-pass", "brand-new-pass")
            .await
            .unwrap();
        assert!(service.login("rahim@mess.com", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn role_and_start_date_updates() {
        let service = service().await;
        let member = service.create_member(rahim()).await.unwrap();

        let promoted = service.update_role(&member.id, MemberRole::Admin).await.unwrap();
        assert!(promoted.is_admin());

        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let moved = service.set_mess_start_date(&member.id, date).await.unwrap();
        assert_eq!(moved.mess_start_date, Some(date));

        let err = service.update_role("missing", MemberRole::Admin).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
