//! Driven port for meal persistence.
//!
//! Every method takes the owner's id and adapters must filter by it; there is
//! no way to address a meal without naming its owner.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Meal, MealPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by meal repository adapters.
    pub enum MealPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "meal repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Persist a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealPersistenceError>;

    /// List the owner's meals ordered by time ascending, ties broken by id.
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealPersistenceError>;

    /// Find one of the owner's meals.
    async fn find_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<Option<Meal>, MealPersistenceError>;

    /// Apply `patch` to the owner's meal and return the updated rows.
    ///
    /// Callers must not pass an empty patch.
    async fn update_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
        patch: &MealPatch,
    ) -> Result<Vec<Meal>, MealPersistenceError>;

    /// Delete the owner's meal, returning the number of rows removed.
    async fn delete_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<usize, MealPersistenceError>;
}
