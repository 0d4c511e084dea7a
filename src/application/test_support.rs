use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Member, MemberRole, NewMember, RepositoryProvider};
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::database::test_database;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) async fn repos() -> Arc<dyn RepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(test_database().await))
}

/// Insert a member directly, skipping password hashing.
pub(crate) async fn seed_member(
    repos: &dyn RepositoryProvider,
    name: &str,
    role: MemberRole,
    mess_start_date: Option<NaiveDate>,
) -> Member {
    repos
        .members()
        .create(NewMember {
            name: name.to_string(),
            email: format!("{}@mess.com", name.to_lowercase()),
            password_hash: "not-a-hash".to_string(),
            role,
            mess_start_date,
        })
        .await
        .unwrap()
}
