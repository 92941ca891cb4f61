//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MealsCommand, MealsQuery, UserAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserAccounts>,
    pub meals: Arc<dyn MealsCommand>,
    pub meals_query: Arc<dyn MealsQuery>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Bundle port implementations for the HTTP layer.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use daily_diet::domain::{MealService, UserAccountsService};
    /// use daily_diet::inbound::http::state::HttpState;
    /// use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let meals = Arc::new(MealService::new(Arc::new(InMemoryMealRepository::default())));
    /// let state = HttpState::new(
    ///     Arc::new(UserAccountsService::new(
    ///         Arc::new(InMemoryUserRepository::default()),
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     meals.clone(),
    ///     meals,
    /// );
    /// assert!(!state.cookie_secure);
    /// ```
    pub fn new(
        users: Arc<dyn UserAccounts>,
        meals: Arc<dyn MealsCommand>,
        meals_query: Arc<dyn MealsQuery>,
    ) -> Self {
        Self {
            users,
            meals,
            meals_query,
            cookie_secure: false,
        }
    }

    /// Set the `Secure` attribute on issued session cookies.
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}
