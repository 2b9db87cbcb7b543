//! Note image model
//!
//! A note edit touches at most one image slot. [`ImageChange`] captures which
//! of the possible transitions a submission asks for.

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Image attached to a note, including its binary
#[derive(Debug, Clone, FromRow)]
pub struct NoteImage {
    pub id: Uuid,
    pub note_id: Uuid,
    pub alt_text: Option<String>,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image metadata rendered next to a note
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub id: Uuid,
    pub alt_text: Option<String>,
}

/// A freshly uploaded image
#[derive(Debug, Clone)]
pub struct NewImage {
    pub alt_text: Option<String>,
    pub content_type: String,
    pub blob: Bytes,
}

/// What an edit does to the note's image slot
#[derive(Debug, Clone, Default)]
pub enum ImageChange {
    /// Leave images untouched
    #[default]
    Keep,
    /// Attach a new image
    Insert(NewImage),
    /// Swap the binary and alt text of an existing image
    Replace { id: Uuid, image: NewImage },
    /// Change only the alt text, keeping the stored binary
    UpdateAltText { id: Uuid, alt_text: Option<String> },
}

impl ImageChange {
    /// The existing image this change targets, if any
    pub fn target(&self) -> Option<Uuid> {
        match self {
            ImageChange::Keep | ImageChange::Insert(_) => None,
            ImageChange::Replace { id, .. } | ImageChange::UpdateAltText { id, .. } => Some(*id),
        }
    }
}
