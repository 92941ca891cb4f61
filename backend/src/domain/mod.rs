//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: Define the strongly typed entities shared by the HTTP and
//! persistence adapters, and the services that implement the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic error payload.
//! - User, UserId, SessionToken, EmailAddress — registered users.
//! - Meal, NewMeal, MealPatch — logged meals.
//! - MealMetrics — diet compliance summary.
//! - UserAccountsService, MealService — driving port implementations.

pub mod error;
pub mod meal;
pub mod meal_service;
pub mod metrics;
pub mod ports;
pub mod user;
pub mod user_accounts_service;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::meal::{Meal, MealDraft, MealPatch, NewMeal};
pub use self::meal_service::MealService;
pub use self::metrics::MealMetrics;
pub use self::user::{
    EmailAddress, SessionToken, User, UserDraft, UserId, UserRegistration, UserValidationError,
};
pub use self::user_accounts_service::UserAccountsService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use daily_diet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing session cookie"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
