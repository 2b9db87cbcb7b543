//! Notes service routes

use axum::{
    Extension, Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::{FORM_FIELDS_ALLOWANCE, MAX_UPLOAD_SIZE},
    honeypot::{self, HoneypotInputProps},
    middleware::session_middleware,
    models::{User, is_valid_username},
    session::Session,
    state::AppState,
};

pub mod auth;
pub mod images;
pub mod note_editor;
pub mod notes;
pub mod users;

/// Create the router for the notes service
pub fn create_router(state: AppState) -> Router {
    let editor_routes = Router::new()
        .route(
            "/users/:username/notes/new",
            get(note_editor::new_note).post(note_editor::create_note),
        )
        .route(
            "/users/:username/notes/:note_id/edit",
            get(note_editor::edit_note).post(note_editor::update_note),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + FORM_FIELDS_ALLOWANCE));

    let page_routes = Router::new()
        .route("/", get(root))
        .route("/signup", post(auth::signup))
        .route("/logout", get(auth::logout_redirect).post(auth::logout))
        .route("/users/:username", get(users::profile))
        .route("/users/:username/notes", get(notes::list_notes))
        .route(
            "/users/:username/notes/:note_id",
            get(notes::view_note).post(notes::delete_note),
        )
        .merge(editor_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/resources/images/:image_id", get(images::note_image))
        .route("/resources/user-images/:image_id", get(images::user_image))
        .merge(page_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "notes-service"
    }))
}

/// Signed-in user as shown in the page chrome
#[derive(Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// Data every page needs: the anti-forgery token and honeypot inputs for its
/// forms, and the signed-in user if any.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootData {
    pub csrf_token: String,
    pub honeypot: HoneypotInputProps,
    pub user: Option<SessionUser>,
}

/// Root loader
pub async fn root(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<RootData>> {
    let user = match session.user_id {
        Some(id) => state.users.find_by_id(id).await?,
        None => None,
    };

    Ok(Json(RootData {
        csrf_token: session.csrf_token,
        honeypot: honeypot::input_props(),
        user: user.map(|user| SessionUser {
            id: user.id,
            username: user.username,
            name: user.name,
        }),
    }))
}

/// Resolve the user named in the URL
pub(crate) async fn find_owner(state: &AppState, username: &str) -> AppResult<User> {
    if !is_valid_username(username) {
        return Err(AppError::user_not_found(username));
    }

    state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::user_not_found(username))
}

/// Note ids in URLs are UUIDs; anything else cannot name a note
pub(crate) fn parse_note_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::note_not_found(raw))
}

/// Canonical URL of a note
pub(crate) fn note_path(username: &str, note_id: Uuid) -> String {
    format!("/users/{username}/notes/{note_id}")
}

/// The signed-in user, who must be `username`
pub(crate) async fn require_owner(
    state: &AppState,
    session: &Session,
    username: &str,
) -> AppResult<User> {
    let user_id = session.user_id.ok_or(AppError::Unauthorized)?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if user.username != username {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    Ok(user)
}
