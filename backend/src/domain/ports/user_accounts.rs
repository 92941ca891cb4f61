//! Driving port for registration and session resolution.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, User, UserId, UserRegistration};

/// Driving port used by inbound adapters to register users and resolve the
/// session cookie to a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a new user bound to the registration's session token.
    ///
    /// Fails with `invalid_request` when the email is already registered.
    async fn register(&self, registration: UserRegistration) -> Result<UserId, Error>;

    /// Return the user owning `token`, or `None` when no user holds it.
    async fn resolve_session(&self, token: &SessionToken) -> Result<Option<User>, Error>;
}
