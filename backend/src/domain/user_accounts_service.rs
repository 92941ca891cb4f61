//! User registration and session resolution.
//!
//! Registration binds the caller's session token to a new user record. The
//! email uniqueness check runs before the insert; a concurrent registration
//! that slips past it is caught by the repository's unique constraint and
//! reported the same way.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserAccounts, UserPersistenceError, UserRepository};
use crate::domain::{Error, SessionToken, User, UserDraft, UserId, UserRegistration};

pub(crate) const EMAIL_IN_USE_MESSAGE: &str = "Email already in use";

fn email_in_use() -> Error {
    Error::invalid_request(EMAIL_IN_USE_MESSAGE).with_details(json!({
        "field": "email",
        "code": "email_in_use",
    }))
}

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_in_use(),
    }
}

/// Domain service implementing [`UserAccounts`] over a [`UserRepository`].
#[derive(Clone)]
pub struct UserAccountsService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserAccountsService<R> {
    /// Create a service that stamps registrations with `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use daily_diet::domain::UserAccountsService;
    /// use daily_diet::outbound::memory::InMemoryUserRepository;
    /// use mockable::DefaultClock;
    ///
    /// let _service = UserAccountsService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<R> UserAccounts for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: UserRegistration) -> Result<UserId, Error> {
        let UserRegistration {
            name,
            email,
            session_token,
        } = registration;

        let existing = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(email_in_use());
        }

        let user = User::new(UserDraft {
            id: UserId::random(),
            session_token,
            name,
            email,
            created_at: self.clock.utc(),
        });
        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), "registered user");
        Ok(*user.id())
    }

    async fn resolve_session(&self, token: &SessionToken) -> Result<Option<User>, Error> {
        self.users
            .find_by_session_token(token)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
