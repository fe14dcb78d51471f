use axum::{Router, http::Method, middleware, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};

use crate::handler::{AppState, healthcheck};

pub mod assets;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod method_override;
pub mod model;
pub mod negotiate;
pub mod notes;
pub mod store;

/// Builds the service: routes, static fallback, method override, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(healthcheck))
        .nest("/notes", notes::routes())
        .fallback(assets::serve_embedded)
        .with_state(state);

    // Method override and trailing-slash trimming must see the request before `routes`
    // matches on the method and path.
    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(method_override::method_override))
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
