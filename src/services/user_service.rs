//! src/services/user_service.rs
//!
//! UserService: registration, lookup, partial update and removal of users.
//! Email uniqueness is enforced by the schema and surfaced as a conflict.

use crate::{
    models::user::{User, UserPatch},
    repositories::user_repository,
    services::error::{ServiceError, ServiceResult, is_unique_violation},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    pub db: Arc<SqlitePool>,
}

fn email_conflict(email: &str) -> impl FnOnce(sqlx::Error) -> ServiceError + '_ {
    move |err| {
        if is_unique_violation(&err) {
            ServiceError::Conflict(format!("email {email} is already registered"))
        } else {
            ServiceError::Sqlx(err)
        }
    }
}

impl UserService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    pub async fn create_user(&self, name: &str, email: &str) -> ServiceResult<User> {
        let mut conn = self.db.acquire().await?;
        let user = user_repository::insert(&mut conn, name, email)
            .await
            .map_err(email_conflict(email))?;

        info!("registered user {} <{}>", user.id, user.email);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> ServiceResult<User> {
        let mut conn = self.db.acquire().await?;
        user_repository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))
    }

    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let mut conn = self.db.acquire().await?;
        Ok(user_repository::list_all(&mut conn).await?)
    }

    /// Overwrite the present, non-blank fields of `patch`.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> ServiceResult<User> {
        let mut tx = self.db.begin().await?;

        let mut user = user_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))?;

        if let Some(name) = patch.name.filter(|n| !n.trim().is_empty()) {
            user.name = name;
        }
        if let Some(email) = patch.email.filter(|e| !e.trim().is_empty()) {
            user.email = email;
        }

        let updated = user_repository::update(&mut tx, &user)
            .await
            .map_err(email_conflict(&user.email))?;
        tx.commit().await?;

        info!("updated user {}", id);
        Ok(updated)
    }

    /// Remove a user; their items, bookings, requests and comments go with them.
    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        let mut conn = self.db.acquire().await?;
        if user_repository::delete(&mut conn, id).await? == 0 {
            return Err(ServiceError::user_not_found(id));
        }

        info!("deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn service() -> UserService {
        UserService::new(Arc::new(test_pool().await))
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let users = service().await;
        let created = users
            .create_user("alice", "alice@example.com")
            .await
            .expect("create");

        let fetched = users.get_user(created.id).await.expect("get");
        assert_eq!(fetched, created);
        assert_eq!(users.list_users().await.expect("list"), vec![created]);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let users = service().await;
        users
            .create_user("alice", "alice@example.com")
            .await
            .expect("first");

        let dup = users.create_user("other", "alice@example.com").await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_ignores_blank_fields_and_checks_email() {
        let users = service().await;
        let alice = users
            .create_user("alice", "alice@example.com")
            .await
            .expect("alice");
        users
            .create_user("bob", "bob@example.com")
            .await
            .expect("bob");

        let renamed = users
            .update_user(
                alice.id,
                UserPatch {
                    name: Some("Alice".into()),
                    email: Some("".into()),
                },
            )
            .await
            .expect("rename");
        assert_eq!(renamed.name, "Alice");
        assert_eq!(renamed.email, "alice@example.com");

        // Re-saving one's own email is fine.
        users
            .update_user(
                alice.id,
                UserPatch {
                    name: None,
                    email: Some("alice@example.com".into()),
                },
            )
            .await
            .expect("same email");

        let taken = users
            .update_user(
                alice.id,
                UserPatch {
                    name: None,
                    email: Some("bob@example.com".into()),
                },
            )
            .await;
        assert!(matches!(taken, Err(ServiceError::Conflict(_))));

        let missing = users.update_user(999, UserPatch::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_user_once() {
        let users = service().await;
        let alice = users
            .create_user("alice", "alice@example.com")
            .await
            .expect("alice");

        users.delete_user(alice.id).await.expect("delete");
        assert!(matches!(
            users.get_user(alice.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            users.delete_user(alice.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
