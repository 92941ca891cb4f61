//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, SessionToken, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected an insert.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `DuplicateEmail` if the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Find the user registered with `email`.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserPersistenceError>;

    /// Find the earliest user registered under a session token.
    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserPersistenceError>;
}
