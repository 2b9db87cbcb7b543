//! Note listing, note view and delete

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Redirect,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{find_owner, parse_note_id};
use crate::{
    csrf,
    error::{AppError, AppResult, require_param},
    forms::FormData,
    models::{ImageSummary, NoteSummary},
    session::Session,
    state::AppState,
};

/// Form field selecting the operation of the note form
pub const INTENT_FIELD: &str = "intent";
pub const DELETE_INTENT: &str = "delete";

#[derive(Serialize)]
pub struct NotesOwner {
    pub username: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct NotesListData {
    pub owner: NotesOwner,
    pub notes: Vec<NoteSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<ImageSummary>,
}

#[derive(Serialize)]
pub struct NoteData {
    pub note: NoteView,
}

/// GET /users/:username/notes
pub async fn list_notes(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<NotesListData>> {
    let owner = find_owner(&state, &username).await?;
    let notes = state.notes.list_by_owner(owner.id).await?;

    Ok(Json(NotesListData {
        owner: NotesOwner {
            username: owner.username,
            name: owner.name,
        },
        notes,
    }))
}

/// GET /users/:username/notes/:note_id
pub async fn view_note(
    State(state): State<AppState>,
    Path((username, note_id)): Path<(String, String)>,
) -> AppResult<Json<NoteData>> {
    let owner = find_owner(&state, &username).await?;
    let id = parse_note_id(&note_id)?;

    let found = state
        .notes
        .find_for_owner(owner.id, id)
        .await?
        .ok_or_else(|| AppError::note_not_found(&note_id))?;

    Ok(Json(NoteData {
        note: NoteView {
            id: found.note.id,
            title: found.note.title,
            content: found.note.content,
            updated_at: found.note.updated_at,
            images: found.images,
        },
    }))
}

/// POST /users/:username/notes/:note_id
///
/// Deletes the note when the form carries a valid CSRF token and
/// `intent=delete`, then redirects to the owner's notes.
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((username, note_id)): Path<(String, String)>,
    form: FormData,
) -> AppResult<Redirect> {
    let note_id = require_param(&note_id, "noteId param is required")?;

    csrf::validate(&form, &session).inspect_err(|e| {
        warn!(session_id = %session.id, "Rejected note action: {}", e);
    })?;

    if form.get(INTENT_FIELD) != Some(DELETE_INTENT) {
        return Err(AppError::InvalidIntent);
    }

    let owner = find_owner(&state, &username).await?;
    let id = parse_note_id(note_id)?;

    if !state.notes.delete(owner.id, id).await? {
        return Err(AppError::note_not_found(note_id));
    }

    info!("Deleted note {} of {}", id, owner.username);
    Ok(Redirect::to(&format!("/users/{}/notes", owner.username)))
}
