//! Data access for users, notes and images
//!
//! Handlers depend on the traits; the PostgreSQL implementations are wired in
//! `main`.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{
    NewNote, Note, NoteImage, NoteSummary, NoteUpdate, NoteWithImages, User, UserImage,
};

pub mod note;
pub mod user;

#[cfg(test)]
pub mod memory;

pub use note::PgNoteRepository;
pub use user::PgUserRepository;

/// Result of applying a [`NoteUpdate`]
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(Note),
    /// No note with that id belongs to the owner
    NoteNotFound,
    /// The targeted image is not attached to the note; nothing was written
    ImageNotFound(Uuid),
}

/// Read access to users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<UserImage>>;
}

/// Notes and their images
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Titles of an owner's notes, most recently updated first
    async fn list_by_owner(&self, owner_id: Uuid) -> DatabaseResult<Vec<NoteSummary>>;

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
    ) -> DatabaseResult<Option<NoteWithImages>>;

    async fn create(&self, new_note: NewNote) -> DatabaseResult<Note>;

    /// Update title, content and at most one image slot atomically
    async fn update(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> DatabaseResult<UpdateOutcome>;

    /// Returns whether a note was removed
    async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> DatabaseResult<bool>;

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<NoteImage>>;
}
