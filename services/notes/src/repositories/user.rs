//! PostgreSQL user repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use uuid::Uuid;

use super::UserRepository;
use crate::models::{User, UserImage};

const USER_COLUMNS: &str = r#"
    u.id, u.username, u.email, u.name, ui.id AS image_id, u.created_at, u.updated_at
    FROM users u
    LEFT JOIN user_images ui ON ui.user_id = u.id
"#;

/// User repository for database operations
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} WHERE u.username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_image(&self, image_id: Uuid) -> DatabaseResult<Option<UserImage>> {
        let image = sqlx::query_as::<_, UserImage>(
            r#"
            SELECT id, user_id, alt_text, content_type, blob, updated_at
            FROM user_images
            WHERE id = $1
            "#,
        )
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }
}
