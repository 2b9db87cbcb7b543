//! Note editor: loaders and actions for creating and editing notes

use axum::{
    Extension, Json,
    extract::{FromRequest, Path, Request, State},
    response::Redirect,
};
use serde::Serialize;
use tracing::{info, warn};

use super::{find_owner, note_path, parse_note_id, require_owner};
use crate::{
    error::{AppError, AppResult, require_param},
    forms::{FormData, NoteEditorForm, NoteEditorSubmission, SubmissionReply},
    models::{ImageSummary, NewNote, NoteUpdate},
    repositories::UpdateOutcome,
    session::Session,
    state::AppState,
};

#[derive(Serialize)]
pub struct EditableNote {
    pub title: String,
    pub content: String,
    pub images: Vec<ImageSummary>,
}

#[derive(Serialize)]
pub struct NoteEditorData {
    pub note: Option<EditableNote>,
}

/// GET /users/:username/notes/:note_id/edit
pub async fn edit_note(
    State(state): State<AppState>,
    Path((username, note_id)): Path<(String, String)>,
) -> AppResult<Json<NoteEditorData>> {
    let owner = find_owner(&state, &username).await?;
    let id = parse_note_id(&note_id)?;

    let found = state
        .notes
        .find_for_owner(owner.id, id)
        .await?
        .ok_or_else(|| AppError::note_not_found(&note_id))?;

    Ok(Json(NoteEditorData {
        note: Some(EditableNote {
            title: found.note.title,
            content: found.note.content,
            images: found.images,
        }),
    }))
}

/// POST /users/:username/notes/:note_id/edit
pub async fn update_note(
    State(state): State<AppState>,
    Path((username, note_id)): Path<(String, String)>,
    request: Request,
) -> AppResult<Redirect> {
    let note_id = require_param(&note_id, "noteId param is required")?;

    let form = FormData::from_request(request, &state).await?;
    let submission = validate_submission(&form)?;

    let owner = find_owner(&state, &username).await?;
    let id = parse_note_id(note_id)?;

    let update = NoteUpdate {
        image: submission.image_change(),
        title: submission.title,
        content: submission.content,
    };

    match state.notes.update(owner.id, id, update).await? {
        UpdateOutcome::Updated(note) => {
            info!("Note {} edited by {}", note.id, owner.username);
            Ok(Redirect::to(&note_path(&owner.username, note.id)))
        }
        UpdateOutcome::NoteNotFound => Err(AppError::note_not_found(note_id)),
        UpdateOutcome::ImageNotFound(image_id) => {
            Err(AppError::image_not_found(&image_id.to_string()))
        }
    }
}

/// GET /users/:username/notes/new
pub async fn new_note(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(username): Path<String>,
) -> AppResult<Json<NoteEditorData>> {
    require_owner(&state, &session, &username).await?;
    Ok(Json(NoteEditorData { note: None }))
}

/// POST /users/:username/notes/new
pub async fn create_note(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(username): Path<String>,
    request: Request,
) -> AppResult<Redirect> {
    let owner = require_owner(&state, &session, &username).await?;

    let form = FormData::from_request(request, &state).await?;
    let submission = validate_submission(&form)?;

    let note = state
        .notes
        .create(NewNote {
            owner_id: owner.id,
            image: submission.new_image(),
            title: submission.title,
            content: submission.content,
        })
        .await?;

    info!("Note {} created by {}", note.id, owner.username);
    Ok(Redirect::to(&note_path(&owner.username, note.id)))
}

fn validate_submission(form: &FormData) -> AppResult<NoteEditorSubmission> {
    NoteEditorForm::parse(form).map_err(|errors| {
        warn!("Rejected note submission: {:?}", errors);
        AppError::Validation(SubmissionReply::new(form, errors))
    })
}
