//! User registration handler.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! ```

use actix_web::{HttpRequest, HttpResponse, ResponseError, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::{Error, SessionToken, UserRegistration};
use crate::inbound::http::session::{session_cookie, session_token_from_request};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email};

const EMAIL: FieldName = FieldName::new("email");

/// Registration request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

async fn register(
    state: &HttpState,
    token: SessionToken,
    body: RegisterUserRequest,
) -> Result<(), Error> {
    let email = parse_email(body.email, EMAIL)?;
    state
        .users
        .register(UserRegistration {
            name: body.name,
            email,
            session_token: token,
        })
        .await?;
    Ok(())
}

/// Register a user bound to the caller's session cookie.
///
/// Without a `sessionId` cookie a fresh token is minted and returned in
/// `Set-Cookie`, even if registration is then rejected.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", headers(("Set-Cookie" = String, description = "sessionId cookie, issued when the request had none"))),
        (status = 400, description = "Invalid request or email already in use", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> HttpResponse {
    let (token, minted) = match session_token_from_request(&req) {
        Some(token) => (token, false),
        None => (SessionToken::generate(), true),
    };

    let mut response = match register(&state, token.clone(), payload.into_inner()).await {
        Ok(()) => {
            info!(minted, "user registration accepted");
            HttpResponse::Created().finish()
        }
        Err(err) => err.error_response(),
    };

    if minted {
        if let Err(err) = response.add_cookie(&session_cookie(&token, state.cookie_secure)) {
            error!(error = %err, "failed to attach session cookie");
            return Error::internal("failed to issue session cookie").error_response();
        }
    }
    response
}
