/**
 * Server Initialization
 *
 * This module builds the application from a [`ServerConfig`]: storage
 * collaborators, template cache, session store and router.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations when `DATABASE_URL` is set,
 *    otherwise fall back to in-memory storage
 * 2. Compile the template cache (any failure aborts startup)
 * 3. Pick the session store (its own schema is migrated separately)
 * 4. Start the periodic expired-session cleanup task
 * 5. Create the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

use crate::backend::auth::users::{MemoryUsers, PgUsers, UserRepository};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::session::SessionBackend;
use crate::backend::snippets::{MemorySnippets, PgSnippets, SnippetRepository};
use crate::backend::templates::{TemplateCache, TemplateError};

/// How often expired sessions are purged from the store
pub const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("template cache could not be built: {0}")]
    Templates(#[from] TemplateError),
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn load_database(database_url: &str) -> Result<PgPool, InitError> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Build the application state for `config`
pub async fn create_state(config: &ServerConfig) -> Result<AppState, InitError> {
    let templates = Arc::new(TemplateCache::from_dir(&config.template_dir)?);

    let (snippets, users, sessions): (
        Arc<dyn SnippetRepository>,
        Arc<dyn UserRepository>,
        SessionBackend,
    ) = match &config.database_url {
        Some(url) => {
            let pool = load_database(url).await?;
            let store = PostgresStore::new(pool.clone());
            store.migrate().await?;
            (
                Arc::new(PgSnippets::new(pool.clone())),
                Arc::new(PgUsers::new(pool)),
                SessionBackend::Postgres(store),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using in-memory storage; data is lost on restart.");
            (
                Arc::new(MemorySnippets::new()),
                Arc::new(MemoryUsers::new()),
                SessionBackend::memory(),
            )
        }
    };

    Ok(AppState {
        snippets,
        users,
        templates,
        sessions,
        session_config: config.session.clone(),
        auth_policy: config.auth_policy,
        static_dir: config.static_dir.clone(),
    })
}

/// Periodically delete expired sessions from the store
pub fn spawn_session_cleanup(store: SessionBackend, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(()) => tracing::debug!("cleaned up expired sessions"),
                Err(e) => tracing::warn!(error = %e, "expired session cleanup failed"),
            }
        }
    })
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router, InitError> {
    tracing::info!("Initializing snipbox server");

    let app_state = create_state(config).await?;
    spawn_session_cleanup(app_state.sessions.clone(), SESSION_CLEANUP_INTERVAL);

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic session cleanup task");
    Ok(app)
}
