//! PostgreSQL note repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::{NoteRepository, UpdateOutcome};
use crate::models::{
    ImageChange, ImageSummary, NewImage, NewNote, Note, NoteImage, NoteSummary, NoteUpdate,
    NoteWithImages,
};

/// Note repository for database operations
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new note repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_image(
        tx: &mut Transaction<'_, Postgres>,
        note_id: Uuid,
        image: &NewImage,
    ) -> DatabaseResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO note_images (id, note_id, alt_text, content_type, blob)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(note_id)
        .bind(image.alt_text.as_deref())
        .bind(&image.content_type)
        .bind(image.blob.as_ref())
        .execute(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Apply an image change inside `tx`; `false` when the targeted image
    /// does not belong to the note.
    async fn apply_image_change(
        tx: &mut Transaction<'_, Postgres>,
        note_id: Uuid,
        change: &ImageChange,
    ) -> DatabaseResult<bool> {
        let rows_affected = match change {
            ImageChange::Keep => return Ok(true),
            ImageChange::Insert(image) => {
                Self::insert_image(tx, note_id, image).await?;
                return Ok(true);
            }
            ImageChange::Replace { id, image } => sqlx::query(
                r#"
                UPDATE note_images
                SET alt_text = $1, content_type = $2, blob = $3, updated_at = NOW()
                WHERE id = $4 AND note_id = $5
                "#,
            )
            .bind(image.alt_text.as_deref())
            .bind(&image.content_type)
            .bind(image.blob.as_ref())
            .bind(id)
            .bind(note_id)
            .execute(&mut **tx)
            .await?
            .rows_affected(),
            ImageChange::UpdateAltText { id, alt_text } => sqlx::query(
                r#"
                UPDATE note_images
                SET alt_text = $1, updated_at = NOW()
                WHERE id = $2 AND note_id = $3
                "#,
            )
            .bind(alt_text.as_deref())
            .bind(id)
            .bind(note_id)
            .execute(&mut **tx)
            .await?
            .rows_affected(),
        };

        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> DatabaseResult<Vec<NoteSummary>> {
        let notes = sqlx::query_as::<_, NoteSummary>(
            r#"
            SELECT id, title
            FROM notes
            WHERE owner_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
    ) -> DatabaseResult<Option<NoteWithImages>> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(note_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(note) = note else {
            return Ok(None);
        };

        let images = sqlx::query_as::<_, ImageSummary>(
            r#"
            SELECT id, alt_text
            FROM note_images
            WHERE note_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(note.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(NoteWithImages { note, images }))
    }

    async fn create(&self, new_note: NewNote) -> DatabaseResult<Note> {
        let mut tx = self.pool.begin().await?;

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, owner_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, content, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_note.owner_id)
        .bind(&new_note.title)
        .bind(&new_note.content)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(image) = &new_note.image {
            Self::insert_image(&mut tx, note.id, image).await?;
        }

        tx.commit().await?;

        info!("Created note {} for owner {}", note.id, note.owner_id);
        Ok(note)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> DatabaseResult<UpdateOutcome> {
        let mut tx = self.pool.begin().await?;

        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $1, content = $2, updated_at = NOW()
            WHERE id = $3 AND owner_id = $4
            RETURNING id, owner_id, title, content, created_at, updated_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.content)
        .bind(note_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(note) = note else {
            return Ok(UpdateOutcome::NoteNotFound);
        };

        if !Self::apply_image_change(&mut tx, note.id, &update.image).await? {
            let image_id = update.image.target().unwrap_or_default();
            return Ok(UpdateOutcome::ImageNotFound(image_id));
        }

        tx.commit().await?;

        info!("Updated note {}", note.id);
        Ok(UpdateOutcome::Updated(note))
    }

    async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(note_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<NoteImage>> {
        let image = sqlx::query_as::<_, NoteImage>(
            r#"
            SELECT id, note_id, alt_text, content_type, blob, created_at, updated_at
            FROM note_images
            WHERE id = $1
            "#,
        )
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }
}
