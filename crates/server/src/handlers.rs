//! HTTP request handlers.
//!
//! Each handler resolves the active backend through the selector, performs
//! one storage operation and maps the outcome onto HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use note_api_storage::{CreateNoteRequest, Note, NoteBackend};
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ApiError, selector::BackendSelector};

/// Shared handler state: the selector owning the active backend.
pub type AppState = &'static BackendSelector;

/// `GET /`
pub async fn redirect_to_notes() -> Redirect {
    Redirect::temporary("/notes")
}

/// `GET /notes`: every stored note, in `keys` order.
#[instrument(name = "get_notes", skip(selector))]
pub async fn list_notes(State(selector): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let backend = selector.get().await?;
    Ok(Json(backend.list().await?))
}

/// `GET /notes/{note_id}`
#[instrument(name = "get_note", skip(selector))]
pub async fn get_note(
    State(selector): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let backend = selector.get().await?;
    Ok(Json(backend.get(&note_id).await?))
}

/// `PUT /notes/{note_id}`: create or replace the note under a caller-chosen id.
#[instrument(name = "update_note", skip(selector, request))]
pub async fn update_note(
    State(selector): State<AppState>,
    Path(note_id): Path<String>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<StatusCode, ApiError> {
    let backend = selector.get().await?;
    backend.set(&note_id, &Note::from(request)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /notes`: store under a fresh id and return that id.
#[instrument(
    name = "create_note",
    skip(selector, request),
    fields(note_id = tracing::field::Empty)
)]
pub async fn create_note(
    State(selector): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<Json<String>, ApiError> {
    let backend = selector.get().await?;

    let note_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("note_id", note_id.as_str());

    backend.set(&note_id, &Note::from(request)).await?;
    Ok(Json(note_id))
}
