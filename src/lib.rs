//! Yes/no survey backend gated by per-user API keys.
//!
//! Accounts register once and receive an opaque key; the key authorizes every
//! survey operation except answering, which stays open to anyone holding a
//! survey id. Counters live in SQLite and move only by relative increments.

use axum::{
    Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

pub mod db;
pub mod error;
pub mod identity;
pub mod startup;
pub mod surveys;

pub use startup::AppState;

/// Assemble the full route table over `state`. Split out of `main` so tests
/// can drive the service in process.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(identity::register_user))
        .route(
            "/surveys",
            post(surveys::create_survey)
                .get(surveys::list_surveys)
                .delete(surveys::delete_all_surveys),
        )
        .route(
            "/surveys/:id",
            get(surveys::get_survey)
                .put(surveys::update_survey)
                .delete(surveys::delete_survey),
        )
        .route("/surveys/:id/answer", post(surveys::record_answer))
        .route("/surveys/:id/stats", get(surveys::survey_statistics))
        .route("/health", get(health))
        .layer(Extension(state))
        .fallback(handler_404)
}

async fn health() -> impl IntoResponse {
    axum::Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
