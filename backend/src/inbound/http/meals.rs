//! Meal HTTP handlers.
//!
//! ```text
//! POST   /meals
//! GET    /meals
//! GET    /meals/metrics
//! GET    /meals/{id}
//! PATCH  /meals/{id}
//! DELETE /meals/{id}
//! ```
//!
//! Every handler takes a [`SessionUser`], so requests without a valid
//! `sessionId` cookie are rejected before any meal is read or written.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Meal, MealMetrics, MealPatch, NewMeal};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, deserialize_present, parse_optional_rfc3339_timestamp, parse_rfc3339_timestamp,
    parse_uuid,
};

const ID: FieldName = FieldName::new("id");
const TIME: FieldName = FieldName::new("time");

/// Request payload for logging a meal.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[schema(example = "Popcorn")]
    pub name: String,
    #[schema(example = "Homemade, no butter")]
    pub description: String,
    pub its_on_diet: bool,
    #[schema(format = "date-time", example = "2024-01-22T18:25:43.511Z")]
    pub time: String,
}

/// Partial update payload; omitted fields are left unchanged and explicit
/// `null` values are rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(nullable = false)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(nullable = false)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(nullable = false)]
    pub its_on_diet: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(nullable = false, format = "date-time")]
    pub time: Option<String>,
}

/// Meal as returned to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub its_on_diet: bool,
    #[schema(format = "date-time")]
    pub time: String,
}

impl From<&Meal> for MealBody {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            user_id: meal.user_id().to_string(),
            name: meal.name().to_owned(),
            description: meal.description().to_owned(),
            its_on_diet: meal.is_on_diet(),
            time: meal.time().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MealsResponse {
    pub meals: Vec<MealBody>,
}

/// Single meal lookup; `meal` is `null` when the caller owns no such meal.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MealResponse {
    pub meal: Option<MealBody>,
}

/// Rows affected by a partial update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdatedMealsResponse {
    pub meal: Vec<MealBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBody {
    pub meals_count: usize,
    pub meals_on_diet: usize,
    pub meals_off_diet: usize,
    pub best_sequence: usize,
}

impl From<MealMetrics> for MetricsBody {
    fn from(metrics: MealMetrics) -> Self {
        Self {
            meals_count: metrics.meals_count,
            meals_on_diet: metrics.meals_on_diet,
            meals_off_diet: metrics.meals_off_diet,
            best_sequence: metrics.best_sequence,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MetricsResponse {
    pub metrics: MetricsBody,
}

fn meal_bodies(meals: &[Meal]) -> Vec<MealBody> {
    meals.iter().map(MealBody::from).collect()
}

impl TryFrom<CreateMealRequest> for NewMeal {
    type Error = crate::domain::Error;

    fn try_from(body: CreateMealRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            time: parse_rfc3339_timestamp(&body.time, TIME)?,
            name: body.name,
            description: body.description,
            on_diet: body.its_on_diet,
        })
    }
}

impl TryFrom<UpdateMealRequest> for MealPatch {
    type Error = crate::domain::Error;

    fn try_from(body: UpdateMealRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            time: parse_optional_rfc3339_timestamp(body.time.as_deref(), TIME)?,
            name: body.name,
            description: body.description,
            on_diet: body.its_on_diet,
        })
    }
}

/// Log a meal for the session's user.
#[utoipa::path(
    post,
    path = "/meals",
    request_body = CreateMealRequest,
    responses(
        (status = 201, description = "Meal created"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createMeal",
    security(("SessionCookie" = []))
)]
#[post("/meals")]
pub async fn create_meal(
    session: SessionUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateMealRequest>,
) -> ApiResult<HttpResponse> {
    let meal = NewMeal::try_from(payload.into_inner())?;
    state.meals.create_meal(session.user().id(), meal).await?;
    Ok(HttpResponse::Created().finish())
}

/// List the session user's meals in chronological order.
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Meals", body = MealsResponse),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "listMeals",
    security(("SessionCookie" = []))
)]
#[get("/meals")]
pub async fn list_meals(
    session: SessionUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MealsResponse>> {
    let meals = state.meals_query.list_meals(session.user().id()).await?;
    Ok(web::Json(MealsResponse {
        meals: meal_bodies(&meals),
    }))
}

/// Diet metrics for the session user.
#[utoipa::path(
    get,
    path = "/meals/metrics",
    responses(
        (status = 200, description = "Metrics", body = MetricsResponse),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "mealMetrics",
    security(("SessionCookie" = []))
)]
#[get("/meals/metrics")]
pub async fn meal_metrics(
    session: SessionUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MetricsResponse>> {
    let metrics = state.meals_query.meal_metrics(session.user().id()).await?;
    Ok(web::Json(MetricsResponse {
        metrics: metrics.into(),
    }))
}

/// Fetch one of the session user's meals.
#[utoipa::path(
    get,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    responses(
        (status = 200, description = "Meal, or null when absent", body = MealResponse),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getMeal",
    security(("SessionCookie" = []))
)]
#[get("/meals/{id}")]
pub async fn get_meal(
    session: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MealResponse>> {
    let meal_id = parse_uuid(&path, ID)?;
    let meal = state
        .meals_query
        .get_meal(session.user().id(), meal_id)
        .await?;
    Ok(web::Json(MealResponse {
        meal: meal.as_ref().map(MealBody::from),
    }))
}

/// Partially update one of the session user's meals.
#[utoipa::path(
    patch,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    request_body = UpdateMealRequest,
    responses(
        (status = 200, description = "Updated rows; empty when nothing matched", body = UpdatedMealsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "updateMeal",
    security(("SessionCookie" = []))
)]
#[patch("/meals/{id}")]
pub async fn update_meal(
    session: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateMealRequest>,
) -> ApiResult<web::Json<UpdatedMealsResponse>> {
    let meal_id = parse_uuid(&path, ID)?;
    let patch = MealPatch::try_from(payload.into_inner())?;
    let updated = state
        .meals
        .update_meal(session.user().id(), meal_id, patch)
        .await?;
    Ok(web::Json(UpdatedMealsResponse {
        meal: meal_bodies(&updated),
    }))
}

/// Delete one of the session user's meals.
#[utoipa::path(
    delete,
    path = "/meals/{id}",
    params(("id" = String, Path, format = "uuid", description = "Meal identifier")),
    responses(
        (status = 204, description = "Deleted, or nothing to delete"),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Missing or unknown session", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal",
    security(("SessionCookie" = []))
)]
#[delete("/meals/{id}")]
pub async fn delete_meal(
    session: SessionUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let meal_id = parse_uuid(&path, ID)?;
    state.meals.delete_meal(session.user().id(), meal_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
