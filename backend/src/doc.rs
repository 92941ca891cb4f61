//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the error schemas and the
//! `sessionId` cookie security scheme. Debug builds serve it through Swagger
//! UI at `/docs`.

use crate::inbound::http::meals::{
    CreateMealRequest, MealBody, MealResponse, MealsResponse, MetricsBody, MetricsResponse,
    UpdateMealRequest, UpdatedMealsResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session::SESSION_COOKIE;
use crate::inbound::http::users::RegisterUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Opaque session token issued by POST /users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily diet API",
        description = "Meal tracking with cookie-identified sessions and diet streak metrics.",
        license(name = "ISC", url = "https://opensource.org/licenses/ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::meal_metrics,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::update_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterUserRequest,
        CreateMealRequest,
        UpdateMealRequest,
        MealBody,
        MealsResponse,
        MealResponse,
        UpdatedMealsResponse,
        MetricsBody,
        MetricsResponse,
    )),
    tags(
        (name = "users", description = "Registration"),
        (name = "meals", description = "Meal tracking and diet metrics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
