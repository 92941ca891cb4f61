//! Meal domain service.
//!
//! Implements both meal driving ports over a single [`MealRepository`]. The
//! owner id passed in by the inbound adapter is forwarded to every repository
//! call, so cross-user access is impossible at this layer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{MealPersistenceError, MealRepository, MealsCommand, MealsQuery};
use crate::domain::{Error, Meal, MealMetrics, MealPatch, NewMeal, UserId};

fn map_repository_error(error: MealPersistenceError) -> Error {
    match error {
        MealPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealPersistenceError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

/// Meal service implementing [`MealsCommand`] and [`MealsQuery`].
#[derive(Clone)]
pub struct MealService<R> {
    meals: Arc<R>,
}

impl<R> MealService<R> {
    pub fn new(meals: Arc<R>) -> Self {
        Self { meals }
    }
}

#[async_trait]
impl<R> MealsCommand for MealService<R>
where
    R: MealRepository,
{
    async fn create_meal(&self, owner: &UserId, meal: NewMeal) -> Result<Meal, Error> {
        let meal = Meal::create(*owner, meal);
        self.meals
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %owner, meal_id = %meal.id(), "created meal");
        Ok(meal)
    }

    async fn update_meal(
        &self,
        owner: &UserId,
        meal_id: Uuid,
        patch: MealPatch,
    ) -> Result<Vec<Meal>, Error> {
        if patch.is_empty() {
            // Nothing to write; report the row as it stands.
            debug!(user_id = %owner, %meal_id, "empty meal patch");
            let current = self
                .meals
                .find_for_user(owner, meal_id)
                .await
                .map_err(map_repository_error)?;
            return Ok(current.into_iter().collect());
        }

        let updated = self
            .meals
            .update_for_user(owner, meal_id, &patch)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %owner, %meal_id, rows = updated.len(), "updated meal");
        Ok(updated)
    }

    async fn delete_meal(&self, owner: &UserId, meal_id: Uuid) -> Result<(), Error> {
        let removed = self
            .meals
            .delete_for_user(owner, meal_id)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %owner, %meal_id, rows = removed, "deleted meal");
        Ok(())
    }
}

#[async_trait]
impl<R> MealsQuery for MealService<R>
where
    R: MealRepository,
{
    async fn list_meals(&self, owner: &UserId) -> Result<Vec<Meal>, Error> {
        self.meals
            .list_for_user(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get_meal(&self, owner: &UserId, meal_id: Uuid) -> Result<Option<Meal>, Error> {
        self.meals
            .find_for_user(owner, meal_id)
            .await
            .map_err(map_repository_error)
    }

    async fn meal_metrics(&self, owner: &UserId) -> Result<MealMetrics, Error> {
        let meals = self.list_meals(owner).await?;
        Ok(MealMetrics::from_meals(&meals))
    }
}

#[cfg(test)]
#[path = "meal_service_tests.rs"]
mod tests;
