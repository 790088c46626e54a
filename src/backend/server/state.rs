/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the dependency container built once at startup and handed
 * to the router. It holds:
 * - The snippet and user storage collaborators
 * - The compiled template cache
 * - The session store and cookie settings
 * - The auth freshness policy
 *
 * Nothing in it is mutated after construction; storage collaborators manage
 * their own synchronization.
 *
 * # Example
 *
 * ```rust
 * use snipbox::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(app_state): State<AppState>) {
 *     let latest = app_state.snippets.latest().await;
 *     // ...
 * }
 * ```
 */

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::users::UserRepository;
use crate::backend::middleware::AuthPolicy;
use crate::backend::session::{SessionBackend, SessionConfig};
use crate::backend::snippets::SnippetRepository;
use crate::backend::templates::TemplateCache;

#[derive(Clone)]
pub struct AppState {
    /// Snippet storage
    pub snippets: Arc<dyn SnippetRepository>,

    /// User storage and credential checks
    pub users: Arc<dyn UserRepository>,

    /// Compiled page templates, read-only after startup
    pub templates: Arc<TemplateCache>,

    /// Session store behind the session manager layer
    pub sessions: SessionBackend,

    /// Session cookie name, lifetime and `Secure` flag
    pub session_config: SessionConfig,

    /// Whether auth derivation re-checks that the user exists
    pub auth_policy: AuthPolicy,

    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

/// Lets the not-found middleware take `State<Arc<TemplateCache>>`
impl FromRef<AppState> for Arc<TemplateCache> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.templates.clone()
    }
}
