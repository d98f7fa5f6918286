use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/open", get(handlers::open))
        .route("/example", get(handlers::example))
        .route("/healthz", get(handlers::healthz))
        .route("/api/notion/:database_id", get(handlers::get_calendar))
        .route("/:database_id", get(handlers::database_page))
        .with_state(state)
}
