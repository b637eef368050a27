//! Route table.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Builds the application router over `selector`.
///
/// | Route | Handler |
/// |-------|---------|
/// | `GET /` | redirect to `/notes` |
/// | `GET /notes` | list every note |
/// | `POST /notes` | create a note under a fresh id |
/// | `GET /notes/{note_id}` | fetch one note |
/// | `PUT /notes/{note_id}` | create or replace one note |
pub fn router(selector: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::redirect_to_notes))
        .route("/notes", get(handlers::list_notes).post(handlers::create_note))
        .route("/notes/{note_id}", get(handlers::get_note).put(handlers::update_note))
        .layer(TraceLayer::new_for_http())
        .with_state(selector)
}
