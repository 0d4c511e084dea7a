use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, unique_violation};
use crate::domain::member::{Member, MemberFilter, MemberRepository, MemberRole, NewMember};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::member;
use crate::shared::{validate_pagination, PaginatedResult};

pub struct SeaOrmMemberRepository {
    db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &str) -> DomainResult<Option<member::Model>> {
        member::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_domain(role: member::MemberRole) -> MemberRole {
    match role {
        member::MemberRole::Admin => MemberRole::Admin,
        member::MemberRole::Member => MemberRole::Member,
    }
}

fn role_to_entity(role: MemberRole) -> member::MemberRole {
    match role {
        MemberRole::Admin => member::MemberRole::Admin,
        MemberRole::Member => member::MemberRole::Member,
    }
}

fn member_model_to_domain(model: member::Model) -> Member {
    Member {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: role_to_domain(model.role),
        mess_start_date: model.mess_start_date,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn create(&self, new: NewMember) -> DomainResult<Member> {
        let now = Utc::now();
        let model = member::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new.name),
            email: Set(new.email.clone()),
            password_hash: Set(new.password_hash),
            role: Set(role_to_entity(new.role)),
            mess_start_date: Set(new.mess_start_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if unique_violation(&e) {
                DomainError::Conflict(format!("Email '{}' is already registered", new.email))
            } else {
                db_err(e)
            }
        })?;

        Ok(member_model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Member>> {
        Ok(self.find_model(id).await?.map(member_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>> {
        let model = member::Entity::find()
            .filter(member::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(member_model_to_domain))
    }

    async fn list(&self, filter: MemberFilter) -> DomainResult<PaginatedResult<Member>> {
        let (page, limit) = validate_pagination(filter.page, filter.limit);

        let mut condition = Condition::all();
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(member::Column::Name.contains(search))
                    .add(member::Column::Email.contains(search)),
            );
        }
        if let Some(role) = filter.role {
            condition = condition.add(member::Column::Role.eq(role_to_entity(role)));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(member::Column::IsActive.eq(is_active));
        }

        let query = member::Entity::find()
            .filter(condition)
            .order_by_desc(member::Column::CreatedAt)
            .order_by_asc(member::Column::Name);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .offset(((page - 1) * limit) as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(member_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn find_all(&self) -> DomainResult<Vec<Member>> {
        let models = member::Entity::find()
            .order_by_asc(member::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(member_model_to_domain).collect())
    }

    async fn count_admins(&self) -> DomainResult<u64> {
        member::Entity::find()
            .filter(member::Column::Role.eq(member::MemberRole::Admin))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update_role(&self, id: &str, role: MemberRole) -> DomainResult<Option<Member>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: member::ActiveModel = existing.into();
        active.role = Set(role_to_entity(role));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(Some(member_model_to_domain(updated)))
    }

    async fn update_mess_start_date(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<Member>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: member::ActiveModel = existing.into();
        active.mess_start_date = Set(Some(date));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(Some(member_model_to_domain(updated)))
    }

    async fn set_active(&self, id: &str, is_active: bool) -> DomainResult<Option<Member>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: member::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(Some(member_model_to_domain(updated)))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let Some(existing) = self.find_model(id).await? else {
            return Err(DomainError::not_found("Member", "id", id));
        };

        let mut active: member::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        member::Entity::update_many()
            .col_expr(
                member::Column::LastLoginAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(member::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
