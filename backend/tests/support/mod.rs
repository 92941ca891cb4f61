//! Shared helpers for HTTP integration tests over in-memory adapters.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use daily_diet::Trace;
use daily_diet::domain::{MealService, UserAccountsService};
use daily_diet::inbound::http::{self, session::SESSION_COOKIE, state::HttpState};
use daily_diet::outbound::memory::{InMemoryMealRepository, InMemoryUserRepository};
use mockable::DefaultClock;
use serde_json::{Value, json};

/// HTTP state wired exactly as the server does without a database.
pub fn memory_state() -> HttpState {
    let meals = Arc::new(MealService::new(Arc::new(InMemoryMealRepository::default())));
    HttpState::new(
        Arc::new(UserAccountsService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(DefaultClock),
        )),
        meals.clone(),
        meals,
    )
}

/// Initialise the API service with tracing middleware and all routes.
pub async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(http::configure)
            .default_service(web::to(http::not_found)),
    )
    .await
}

/// Register through `POST /users` and return the issued session cookie.
pub async fn register<S>(app: &S, name: &str, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": name, "email": email }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status().as_u16(), 201, "registration of {email} failed");
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("registration issues a session cookie");
    Cookie::new(SESSION_COOKIE, cookie.value().to_owned())
}

/// Create a meal and assert the `201`.
pub async fn create_meal<S>(app: &S, session: &Cookie<'static>, body: Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/meals")
        .cookie(session.clone())
        .set_json(body)
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status().as_u16(), 201);
}

/// `GET` a JSON document under the session.
pub async fn get_json<S>(app: &S, session: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(session.clone())
        .to_request();
    test::call_and_read_body_json(app, req).await
}

/// Request body for a meal at `time` with the given diet flag.
pub fn meal(name: &str, time: &str, on_diet: bool) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "itsOnDiet": on_diet,
        "time": time,
    })
}
