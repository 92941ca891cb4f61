//! Builders wiring repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use daily_diet::domain::ports::{MealRepository, UserRepository};
use daily_diet::domain::{MealService, UserAccountsService};
use daily_diet::inbound::http::state::HttpState;
use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
use daily_diet::outbound::persistence::{DieselMealRepository, DieselUserRepository};

use super::ServerConfig;

fn services_over<U, M>(users: U, meals: M, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    M: MealRepository + 'static,
{
    let meal_service = Arc::new(MealService::new(Arc::new(meals)));
    HttpState::new(
        Arc::new(UserAccountsService::new(Arc::new(users), clock)),
        meal_service.clone(),
        meal_service,
    )
}

/// Build HTTP state over Diesel repositories when a pool is configured,
/// otherwise over in-memory repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => services_over(
            DieselUserRepository::new(pool.clone()),
            DieselMealRepository::new(pool.clone()),
            clock,
        ),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            services_over(
                InMemoryUserRepository::default(),
                InMemoryMealRepository::default(),
                clock,
            )
        }
    };
    web::Data::new(state.with_cookie_secure(config.cookie_secure))
}
