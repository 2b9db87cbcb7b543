//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    config::AppConfig,
    repositories::{NoteRepository, UserRepository},
    session::SessionStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub sessions: Arc<dyn SessionStore>,
}
