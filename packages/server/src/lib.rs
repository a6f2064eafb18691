pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::from_fn;
use time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chirp API",
        version = "1.0.0",
        description = "REST API for the Chirp microblogging service"
    ),
    tags(
        (name = "Auth", description = "Sign-up, activation, and the session/XSRF/JWT gate"),
        (name = "Profiles", description = "Profile lookup and self-service updates"),
        (name = "Tweets", description = "Tweet CRUD, search, and date-range listing"),
        (name = "Likes", description = "Per-profile likes on tweets"),
        (name = "Images", description = "Externally-stored images attached to tweets"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "session_jwt",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                extractors::auth::JWT_HEADER,
            ))),
        );
    }
}

/// Build the application router.
///
/// Layer order (outermost first): CORS, method override, session,
/// XSRF gate. An overridden verb is already rewritten when the gate
/// classifies the request, and the gate always sees a live session.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            state.config.session.inactivity_minutes,
        )));

    let cors = cors_layer(&state.config.server.cors);

    router
        .layer(from_fn(middleware::xsrf::xsrf_gate))
        .layer(session_layer)
        .layer(from_fn(middleware::method_override::method_override))
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-jwt-token"),
            HeaderName::from_static("x-xsrf-token"),
            HeaderName::from_static("x-http-method"),
        ])
        .expose_headers([HeaderName::from_static("x-jwt-token")])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(config.max_age))
}
