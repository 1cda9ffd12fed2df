//! lexclass-server
//!
//! HTTP front end for the classifier: an HTML form plus a small JSON API.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod form;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        // HTML form
        .route("/", get(routes::index::show_form).post(routes::index::submit_form))
        // JSON API
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/characteristics",
            get(routes::characteristics::list_characteristics),
        )
        .route("/api/classify", post(routes::classify::classify))
        .layer(body_limit)
        .layer(axum_mw::from_fn(middleware::access_log::access_log))
        .layer(cors)
        .with_state(state)
}
