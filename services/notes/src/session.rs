//! Cookie-identified sessions stored in Redis
//!
//! A session carries the anti-forgery token handed to forms and, once a user
//! has signed in, their id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{cache::RedisPool, error::CacheResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::csrf;

/// Session entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub csrf_token: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Fresh anonymous session with a new CSRF token
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            csrf_token: csrf::generate_token(),
            user_id: None,
            created_at: Utc::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence for sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> CacheResult<Option<Session>>;

    async fn save(&self, session: &Session) -> CacheResult<()>;

    async fn destroy(&self, id: Uuid) -> CacheResult<()>;
}

/// Session store keeping one JSON document per session with a TTL
#[derive(Clone)]
pub struct RedisSessionStore {
    redis_pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(redis_pool: RedisPool, ttl_seconds: u64) -> Self {
        Self {
            redis_pool,
            ttl_seconds,
        }
    }

    fn session_key(id: Uuid) -> String {
        format!("session:{}", id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> CacheResult<Option<Session>> {
        self.redis_pool.get_json(&Self::session_key(id)).await
    }

    async fn save(&self, session: &Session) -> CacheResult<()> {
        self.redis_pool
            .set_json(
                &Self::session_key(session.id),
                session,
                Some(self.ttl_seconds),
            )
            .await
    }

    async fn destroy(&self, id: Uuid) -> CacheResult<()> {
        info!("Deleting session: {}", id);
        self.redis_pool.delete(&Self::session_key(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemorySessionStore;
