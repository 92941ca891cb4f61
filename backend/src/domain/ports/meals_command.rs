//! Driving port for meal mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Meal, MealPatch, NewMeal, UserId};

/// Driving port for meal write operations. Every call is scoped to `owner`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealsCommand: Send + Sync {
    /// Log a new meal for `owner` and return it.
    async fn create_meal(&self, owner: &UserId, meal: NewMeal) -> Result<Meal, Error>;

    /// Apply `patch` to one of the owner's meals.
    ///
    /// Returns the affected meals, which is empty when the owner has no meal
    /// with `meal_id`.
    async fn update_meal(
        &self,
        owner: &UserId,
        meal_id: Uuid,
        patch: MealPatch,
    ) -> Result<Vec<Meal>, Error>;

    /// Delete one of the owner's meals. Deleting a missing meal succeeds.
    async fn delete_meal(&self, owner: &UserId, meal_id: Uuid) -> Result<(), Error>;
}
