/**
 * Session Configuration
 *
 * Cookie and lifetime settings, and the `SessionManagerLayer` built from
 * them. Expiry is measured from the last request that saved the session:
 * every save pushes it `lifetime` into the future.
 */

use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

/// Longest accepted session lifetime (one year)
pub const MAX_LIFETIME_HOURS: i64 = 24 * 365;

/// Session cookie and lifetime settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Inactivity lifetime of a session
    pub lifetime: Duration,
    /// Mark the cookie `Secure` (HTTPS only)
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            lifetime: Duration::hours(12),
            secure: true,
        }
    }
}

/// Build the session manager layer for `store`
pub fn session_layer<S>(store: S, config: &SessionConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure)
        .with_expiry(Expiry::OnInactivity(config.lifetime))
}
