//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{
    EmailAddress, MealService, SessionToken, UserAccountsService, UserRegistration,
};
use crate::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};

use super::state::HttpState;

/// Build HTTP state over fresh in-memory repositories.
pub fn in_memory_state() -> HttpState {
    let meals = Arc::new(MealService::new(Arc::new(InMemoryMealRepository::default())));
    HttpState::new(
        Arc::new(UserAccountsService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(DefaultClock),
        )),
        meals.clone(),
        meals,
    )
}

/// Register a user directly through the port and return their token.
pub async fn register(state: &HttpState, name: &str, email: &str) -> SessionToken {
    let token = SessionToken::generate();
    state
        .users
        .register(UserRegistration {
            name: name.to_owned(),
            email: EmailAddress::new(email).expect("valid fixture email"),
            session_token: token.clone(),
        })
        .await
        .expect("fixture registration succeeds");
    token
}
