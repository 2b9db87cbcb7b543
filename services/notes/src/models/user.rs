//! User model

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    /// Profile image, if the user uploaded one
    pub image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in page titles, falling back to the username
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

/// Whether `username` has the shape of a username: 3 to 20 letters, digits
/// or underscores. Anything else cannot name an account.
pub fn is_valid_username(username: &str) -> bool {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex")
    });

    (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&username.len())
        && regex.is_match(username)
}

/// Profile image of a user
#[derive(Debug, Clone, FromRow)]
pub struct UserImage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub alt_text: Option<String>,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}
