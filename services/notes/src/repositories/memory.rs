//! In-memory repositories used by the router tests

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{NoteRepository, UpdateOutcome, UserRepository};
use crate::models::{
    ImageChange, ImageSummary, NewImage, NewNote, Note, NoteImage, NoteSummary, NoteUpdate,
    NoteWithImages, User, UserImage,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    user_images: HashMap<Uuid, UserImage>,
    notes: HashMap<Uuid, Note>,
    images: HashMap<Uuid, NoteImage>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub async fn add_user(&self, username: &str, name: Option<&str>) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name: name.map(str::to_string),
            image_id: None,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .await
            .users
            .insert(user.id, user.clone());
        user
    }

    pub async fn add_user_image(&self, user_id: Uuid, blob: &[u8]) -> Uuid {
        let mut tables = self.tables.lock().await;
        let image = UserImage {
            id: Uuid::new_v4(),
            user_id,
            alt_text: None,
            content_type: "image/png".to_string(),
            blob: blob.to_vec(),
            updated_at: Utc::now(),
        };
        let id = image.id;
        tables.user_images.insert(id, image);
        if let Some(user) = tables.users.get_mut(&user_id) {
            user.image_id = Some(id);
        }
        id
    }

    pub async fn add_note(&self, owner_id: Uuid, title: &str, content: &str) -> Note {
        self.create(NewNote {
            owner_id,
            title: title.to_string(),
            content: content.to_string(),
            image: None,
        })
        .await
        .expect("in-memory insert")
    }

    pub async fn add_image(&self, note_id: Uuid, blob: &[u8], alt_text: Option<&str>) -> Uuid {
        let mut tables = self.tables.lock().await;
        insert_image(
            &mut tables,
            note_id,
            &NewImage {
                alt_text: alt_text.map(str::to_string),
                content_type: "image/png".to_string(),
                blob: blob.to_vec().into(),
            },
        )
    }

    pub async fn note(&self, note_id: Uuid) -> Option<Note> {
        self.tables.lock().await.notes.get(&note_id).cloned()
    }

    pub async fn image(&self, image_id: Uuid) -> Option<NoteImage> {
        self.tables.lock().await.images.get(&image_id).cloned()
    }

    pub async fn images_of(&self, note_id: Uuid) -> Vec<NoteImage> {
        let tables = self.tables.lock().await;
        let mut images: Vec<NoteImage> = tables
            .images
            .values()
            .filter(|image| image.note_id == note_id)
            .cloned()
            .collect();
        images.sort_by_key(|image| image.created_at);
        images
    }
}

fn insert_image(tables: &mut Tables, note_id: Uuid, image: &NewImage) -> Uuid {
    let now = Utc::now();
    let stored = NoteImage {
        id: Uuid::new_v4(),
        note_id,
        alt_text: image.alt_text.clone(),
        content_type: image.content_type.clone(),
        blob: image.blob.to_vec(),
        created_at: now,
        updated_at: now,
    };
    let id = stored.id;
    tables.images.insert(id, stored);
    id
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<UserImage>> {
        Ok(self.tables.lock().await.user_images.get(&image_id).cloned())
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> DatabaseResult<Vec<NoteSummary>> {
        let tables = self.tables.lock().await;
        let mut notes: Vec<&Note> = tables
            .notes
            .values()
            .filter(|note| note.owner_id == owner_id)
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(notes
            .into_iter()
            .map(|note| NoteSummary {
                id: note.id,
                title: note.title.clone(),
            })
            .collect())
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
    ) -> DatabaseResult<Option<NoteWithImages>> {
        let tables = self.tables.lock().await;
        let Some(note) = tables
            .notes
            .get(&note_id)
            .filter(|note| note.owner_id == owner_id)
        else {
            return Ok(None);
        };

        let mut images: Vec<&NoteImage> = tables
            .images
            .values()
            .filter(|image| image.note_id == note_id)
            .collect();
        images.sort_by_key(|image| image.created_at);

        Ok(Some(NoteWithImages {
            note: note.clone(),
            images: images
                .into_iter()
                .map(|image| ImageSummary {
                    id: image.id,
                    alt_text: image.alt_text.clone(),
                })
                .collect(),
        }))
    }

    async fn create(&self, new_note: NewNote) -> DatabaseResult<Note> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            owner_id: new_note.owner_id,
            title: new_note.title,
            content: new_note.content,
            created_at: now,
            updated_at: now,
        };
        tables.notes.insert(note.id, note.clone());
        if let Some(image) = &new_note.image {
            insert_image(&mut tables, note.id, image);
        }
        Ok(note)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        update: NoteUpdate,
    ) -> DatabaseResult<UpdateOutcome> {
        let mut tables = self.tables.lock().await;

        if !tables
            .notes
            .get(&note_id)
            .is_some_and(|note| note.owner_id == owner_id)
        {
            return Ok(UpdateOutcome::NoteNotFound);
        }

        if let Some(target) = update.image.target() {
            if !tables
                .images
                .get(&target)
                .is_some_and(|image| image.note_id == note_id)
            {
                return Ok(UpdateOutcome::ImageNotFound(target));
            }
        }

        let now = Utc::now();
        match update.image {
            ImageChange::Keep => {}
            ImageChange::Insert(image) => {
                insert_image(&mut tables, note_id, &image);
            }
            ImageChange::Replace { id, image } => {
                if let Some(stored) = tables.images.get_mut(&id) {
                    stored.alt_text = image.alt_text;
                    stored.content_type = image.content_type;
                    stored.blob = image.blob.to_vec();
                    stored.updated_at = now;
                }
            }
            ImageChange::UpdateAltText { id, alt_text } => {
                if let Some(stored) = tables.images.get_mut(&id) {
                    stored.alt_text = alt_text;
                    stored.updated_at = now;
                }
            }
        }

        let Some(note) = tables.notes.get_mut(&note_id) else {
            return Ok(UpdateOutcome::NoteNotFound);
        };
        note.title = update.title;
        note.content = update.content;
        note.updated_at = now;

        Ok(UpdateOutcome::Updated(note.clone()))
    }

    async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        if !tables
            .notes
            .get(&note_id)
            .is_some_and(|note| note.owner_id == owner_id)
        {
            return Ok(false);
        }
        tables.notes.remove(&note_id);
        tables.images.retain(|_, image| image.note_id != note_id);
        Ok(true)
    }

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<NoteImage>> {
        Ok(self.tables.lock().await.images.get(&image_id).cloned())
    }
}
