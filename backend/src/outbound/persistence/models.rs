//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{meals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub session_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Meal models
// ---------------------------------------------------------------------------

/// Row struct for reading from the meals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub its_on_diet: bool,
    pub time: DateTime<Utc>,
}

/// Insertable struct for creating new meal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meals)]
pub(crate) struct NewMealRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub its_on_diet: bool,
    pub time: DateTime<Utc>,
}

/// Changeset for partial meal updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = meals)]
pub(crate) struct MealChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub its_on_diet: Option<bool>,
    pub time: Option<DateTime<Utc>>,
}
