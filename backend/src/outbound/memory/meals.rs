//! In-memory `MealRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{MealPersistenceError, MealRepository};
use crate::domain::{Meal, MealPatch, UserId};

use super::lock;

/// Meal repository keyed by meal id.
#[derive(Debug, Default)]
pub struct InMemoryMealRepository {
    meals: Mutex<HashMap<Uuid, Meal>>,
}

fn owned_by(meal: &Meal, owner: &UserId) -> bool {
    meal.user_id() == owner
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealPersistenceError> {
        let mut meals = lock(&self.meals, MealPersistenceError::query)?;
        if meals.contains_key(&meal.id()) {
            return Err(MealPersistenceError::query(format!(
                "meal {} already exists",
                meal.id()
            )));
        }
        meals.insert(meal.id(), meal.clone());
        Ok(())
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealPersistenceError> {
        let meals = lock(&self.meals, MealPersistenceError::query)?;
        let mut owned: Vec<Meal> = meals
            .values()
            .filter(|meal| owned_by(meal, owner))
            .cloned()
            .collect();
        owned.sort_by_key(|meal| (meal.time(), meal.id()));
        Ok(owned)
    }

    async fn find_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<Option<Meal>, MealPersistenceError> {
        let meals = lock(&self.meals, MealPersistenceError::query)?;
        Ok(meals
            .get(&meal_id)
            .filter(|meal| owned_by(meal, owner))
            .cloned())
    }

    async fn update_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
        patch: &MealPatch,
    ) -> Result<Vec<Meal>, MealPersistenceError> {
        let mut meals = lock(&self.meals, MealPersistenceError::query)?;
        Ok(meals
            .get_mut(&meal_id)
            .filter(|meal| owned_by(meal, owner))
            .map(|meal| {
                meal.apply(patch);
                meal.clone()
            })
            .into_iter()
            .collect())
    }

    async fn delete_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<usize, MealPersistenceError> {
        let mut meals = lock(&self.meals, MealPersistenceError::query)?;
        let owned = meals
            .get(&meal_id)
            .is_some_and(|meal| owned_by(meal, owner));
        if owned {
            meals.remove(&meal_id);
        }
        Ok(usize::from(owned))
    }
}
