use std::sync::Arc;

use anyhow::Result;
use common::{
    cache::{RedisConfig, RedisPool},
    database::{self, DatabaseConfig, init_pool, run_migrations},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notes::{
    AppConfig, AppState, create_router,
    repositories::{PgNoteRepository, PgUserRepository},
    session::RedisSessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting notes service");

    let config = AppConfig::load()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool, &sqlx::migrate!("./migrations")).await?;

    // Sessions live in Redis
    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    if !redis_pool.health_check().await? {
        anyhow::bail!("Failed to connect to Redis");
    }

    let app_state = AppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        notes: Arc::new(PgNoteRepository::new(pool)),
        sessions: Arc::new(RedisSessionStore::new(
            redis_pool,
            config.session_ttl_seconds,
        )),
        config: Arc::new(config),
    };

    let bind_address = app_state.config.bind_address();
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Notes service listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
