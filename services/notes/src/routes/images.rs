//! Image resources

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

fn image_response(content_type: String, blob: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        blob,
    )
        .into_response()
}

fn parse_image_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::image_not_found(raw))
}

/// GET /resources/images/:image_id
pub async fn note_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_image_id(&image_id)?;
    let image = state
        .notes
        .find_image(id)
        .await?
        .ok_or_else(|| AppError::image_not_found(&image_id))?;

    Ok(image_response(image.content_type, image.blob))
}

/// GET /resources/user-images/:image_id
pub async fn user_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> AppResult<Response> {
    let id = parse_image_id(&image_id)?;
    let image = state
        .users
        .find_image(id)
        .await?
        .ok_or_else(|| AppError::image_not_found(&image_id))?;

    Ok(image_response(image.content_type, image.blob))
}
