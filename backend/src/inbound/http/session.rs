//! Session cookie handling.
//!
//! The `sessionId` cookie holds an opaque token bound to a user row at
//! registration. [`SessionUser`] resolves it for meal handlers and rejects
//! the request with `401` when the cookie is missing or unknown.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, SessionToken, User};

use super::state::HttpState;

pub const SESSION_COOKIE: &str = "sessionId";
pub(crate) const SESSION_COOKIE_PATH: &str = "/meals";
pub(crate) const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Read the session token from the request cookie, ignoring blank values.
pub(crate) fn session_token_from_request(req: &HttpRequest) -> Option<SessionToken> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| SessionToken::new(cookie.value()).ok())
}

/// Build the cookie issued when registration mints a new token.
pub(crate) fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.as_str().to_owned())
        .path(SESSION_COOKIE_PATH)
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish()
}

/// The user owning the request's session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl SessionUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = session_token_from_request(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token.ok_or_else(|| Error::unauthorized("missing session cookie"))?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            match state.users.resolve_session(&token).await? {
                Some(user) => Ok(Self(user)),
                None => {
                    debug!("session token matched no user");
                    Err(Error::unauthorized("unknown session"))
                }
            }
        })
    }
}
