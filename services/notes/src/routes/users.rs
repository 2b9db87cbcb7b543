//! User profile loader

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::find_owner;
use crate::{error::AppResult, state::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub name: Option<String>,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub image_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct ProfileData {
    pub user: ProfileUser,
}

/// GET /users/:username
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<ProfileData>> {
    let user = find_owner(&state, &username).await?;

    Ok(Json(ProfileData {
        user: ProfileUser {
            display_name: user.display_name().to_string(),
            name: user.name,
            username: user.username,
            created_at: user.created_at,
            image_id: user.image_id,
        },
    }))
}
