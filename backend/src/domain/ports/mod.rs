//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage.
//! Driving ports (`UserAccounts`, `MealsCommand`, `MealsQuery`) are what
//! inbound adapters call. Each driven port exposes a typed error enum so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod meal_repository;
mod meals_command;
mod meals_query;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealPersistenceError, MealRepository};
#[cfg(test)]
pub use meals_command::MockMealsCommand;
pub use meals_command::MealsCommand;
#[cfg(test)]
pub use meals_query::MockMealsQuery;
pub use meals_query::MealsQuery;
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
