//! Driving port for meal reads and diet metrics.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Meal, MealMetrics, UserId};

/// Driving port for meal read operations. Every call is scoped to `owner`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealsQuery: Send + Sync {
    /// List the owner's meals in chronological order.
    async fn list_meals(&self, owner: &UserId) -> Result<Vec<Meal>, Error>;

    /// Fetch one of the owner's meals.
    async fn get_meal(&self, owner: &UserId, meal_id: Uuid) -> Result<Option<Meal>, Error>;

    /// Summarise the owner's meal history.
    async fn meal_metrics(&self, owner: &UserId) -> Result<MealMetrics, Error>;
}
