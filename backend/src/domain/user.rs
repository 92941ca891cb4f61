//! User data model.
//!
//! A user is created once at registration and bound to the opaque session
//! token carried by the browser's `sessionId` cookie.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("session token must not be empty")]
    EmptySessionToken,
    #[error("email must be a valid email address")]
    InvalidEmail,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque token correlating a browser cookie to a user row.
///
/// Tokens are minted as UUID v4 strings but any non-blank cookie value is
/// accepted when looking a session up.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self, UserValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(UserValidationError::EmptySessionToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Tokens act as bearer credentials, keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Leading dots and consecutive dots are rejected separately.
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("dahyun@example.com").is_ok());
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let local_part = email.split('@').next().unwrap_or_default();
        if local_part.starts_with('.') || email.contains("..") || !email_regex().is_match(&email)
        {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated registration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    pub name: String,
    pub email: EmailAddress,
    pub session_token: SessionToken,
}

/// Raw components used to assemble a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub session_token: SessionToken,
    pub name: String,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Registered user.
///
/// ## Invariants
/// - `email` is unique across all users.
/// - Users are never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    session_token: SessionToken,
    name: String,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            session_token,
            name,
            email,
            created_at,
        } = draft;
        Self {
            id,
            session_token,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn session_token(&self) -> &SessionToken {
        &self.session_token
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
