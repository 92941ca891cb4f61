//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod meals;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// Register the JSON error mapping, user and meal routes.
///
/// `/meals/metrics` is registered ahead of `/meals/{id}` so it is never
/// parsed as a meal id. Health probes and documentation are mounted by the
/// server. Unknown routes answer with a `404` error body.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use daily_diet::inbound::http;
///
/// let _app = App::new().configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(users::register_user)
        .service(meals::create_meal)
        .service(meals::list_meals)
        .service(meals::meal_metrics)
        .service(meals::get_meal)
        .service(meals::update_meal)
        .service(meals::delete_meal);
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found("route not found"))
}
