//! Meal data model.
//!
//! Meals belong to exactly one user. Every read and write is scoped by the
//! owner's id, so a meal can only be seen or changed through its owner's
//! session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Fields supplied by a caller when logging a new meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeal {
    pub name: String,
    pub description: String,
    pub on_diet: bool,
    pub time: DateTime<Utc>,
}

/// Partial update of a meal's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub on_diet: Option<bool>,
    pub time: Option<DateTime<Utc>>,
}

impl MealPatch {
    /// Return `true` when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.on_diet.is_none()
            && self.time.is_none()
    }
}

/// Raw components used to assemble a [`Meal`].
#[derive(Debug, Clone)]
pub struct MealDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub on_diet: bool,
    pub time: DateTime<Utc>,
}

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: Uuid,
    user_id: UserId,
    name: String,
    description: String,
    on_diet: bool,
    time: DateTime<Utc>,
}

impl Meal {
    pub fn new(draft: MealDraft) -> Self {
        let MealDraft {
            id,
            user_id,
            name,
            description,
            on_diet,
            time,
        } = draft;
        Self {
            id,
            user_id,
            name,
            description,
            on_diet,
            time,
        }
    }

    /// Build a meal with a fresh id for `owner`.
    pub fn create(owner: UserId, meal: NewMeal) -> Self {
        let NewMeal {
            name,
            description,
            on_diet,
            time,
        } = meal;
        Self::new(MealDraft {
            id: Uuid::new_v4(),
            user_id: owner,
            name,
            description,
            on_diet,
            time,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Whether the meal counts toward diet compliance.
    pub fn is_on_diet(&self) -> bool {
        self.on_diet
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Apply the set fields of `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &MealPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(on_diet) = patch.on_diet {
            self.on_diet = on_diet;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
    }
}
