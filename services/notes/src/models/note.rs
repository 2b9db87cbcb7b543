//! Note model and mutation payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::image::{ImageChange, ImageSummary, NewImage};

/// Note entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A note together with the metadata of its images
#[derive(Debug, Clone)]
pub struct NoteWithImages {
    pub note: Note,
    pub images: Vec<ImageSummary>,
}

/// Entry of an owner's note listing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NoteSummary {
    pub id: Uuid,
    pub title: String,
}

/// Payload for creating a note
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<NewImage>,
}

/// Payload for editing a note
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    pub image: ImageChange,
}
