//! In-memory `UserRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, SessionToken, User};

use super::lock;

/// User repository keeping registrations in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users, UserPersistenceError::query)?;
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users
            .iter()
            .filter(|user| user.session_token() == token)
            .min_by_key(|user| (user.created_at(), *user.id().as_uuid()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserDraft, UserId};
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn user(email: &str, token: &str, age_minutes: i64) -> User {
        User::new(UserDraft {
            id: UserId::random(),
            session_token: SessionToken::new(token).expect("token"),
            name: "Ada".to_owned(),
            email: EmailAddress::new(email).expect("email"),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&user("ada@example.com", "a", 0))
            .await
            .expect("first insert");

        let error = repo
            .insert(&user("ada@example.com", "b", 0))
            .await
            .expect_err("duplicate");

        assert_eq!(
            error,
            UserPersistenceError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn shared_token_resolves_to_earliest_user() {
        let repo = InMemoryUserRepository::default();
        let newer = user("new@example.com", "shared", 1);
        let older = user("old@example.com", "shared", 10);
        repo.insert(&newer).await.expect("insert newer");
        repo.insert(&older).await.expect("insert older");

        let token = SessionToken::new("shared").expect("token");
        let found = repo
            .find_by_session_token(&token)
            .await
            .expect("lookup succeeds");

        assert_eq!(found, Some(older));
    }

    #[rstest]
    #[tokio::test]
    async fn shared_token_ties_break_on_lowest_id() {
        let created_at = Utc::now();
        let with_id = |id: &str, email: &str| {
            User::new(UserDraft {
                id: UserId::from_uuid(uuid::Uuid::parse_str(id).expect("uuid")),
                session_token: SessionToken::new("shared").expect("token"),
                name: "Ada".to_owned(),
                email: EmailAddress::new(email).expect("email"),
                created_at,
            })
        };
        let high = with_id("ffffffff-0000-4000-8000-000000000000", "high@example.com");
        let low = with_id("00000000-0000-4000-8000-000000000000", "low@example.com");
        let repo = InMemoryUserRepository::default();
        repo.insert(&high).await.expect("insert high");
        repo.insert(&low).await.expect("insert low");

        let token = SessionToken::new("shared").expect("token");
        let found = repo
            .find_by_session_token(&token)
            .await
            .expect("lookup succeeds");

        assert_eq!(found, Some(low));
    }
}
