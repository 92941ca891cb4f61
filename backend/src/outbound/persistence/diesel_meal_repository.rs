//! PostgreSQL-backed `MealRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `user_id` alongside the meal id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MealPersistenceError, MealRepository};
use crate::domain::{Meal, MealDraft, MealPatch, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MealChangeset, MealRow, NewMealRow};
use super::pool::{DbPool, PoolError};
use super::schema::meals;

/// Diesel-backed implementation of the meal repository port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MealPersistenceError {
    map_pool_error(error, MealPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> MealPersistenceError {
    map_diesel_error(
        error,
        MealPersistenceError::query,
        MealPersistenceError::connection,
    )
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Meal::new(MealDraft {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            name: row.name,
            description: row.description,
            on_diet: row.its_on_diet,
            time: row.time,
        })
    }
}

impl<'a> From<&'a MealPatch> for MealChangeset<'a> {
    fn from(patch: &'a MealPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            its_on_diet: patch.on_diet,
            time: patch.time,
        }
    }
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewMealRow {
            id: meal.id(),
            user_id: *meal.user_id().as_uuid(),
            name: meal.name(),
            description: meal.description(),
            its_on_diet: meal.is_on_diet(),
            time: meal.time(),
        };

        diesel::insert_into(meals::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .order((meals::time.asc(), meals::id.asc()))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(Meal::from).collect())
    }

    async fn find_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<Option<Meal>, MealPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = meals::table
            .filter(meals::id.eq(meal_id).and(meals::user_id.eq(owner.as_uuid())))
            .select(MealRow::as_select())
            .first::<MealRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Meal::from))
    }

    async fn update_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
        patch: &MealPatch,
    ) -> Result<Vec<Meal>, MealPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<MealRow> = diesel::update(
            meals::table.filter(meals::id.eq(meal_id).and(meals::user_id.eq(owner.as_uuid()))),
        )
        .set(MealChangeset::from(patch))
        .returning(MealRow::as_returning())
        .get_results(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(rows.into_iter().map(Meal::from).collect())
    }

    async fn delete_for_user(
        &self,
        owner: &UserId,
        meal_id: Uuid,
    ) -> Result<usize, MealPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(
            meals::table.filter(meals::id.eq(meal_id).and(meals::user_id.eq(owner.as_uuid()))),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)
    }
}
