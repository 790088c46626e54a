/**
 * Session Operations
 *
 * `tower_sessions::Session` covers put (`insert`), get and remove. Two
 * operations need more care than the raw calls give:
 *
 * - [`pop_string`] reads and clears a one-shot value, and leaves the
 *   session unmodified when the key is absent, so a page view without a
 *   flash message does not force a save
 * - [`renew_token`] issues a new session id, deletes the old record and
 *   drops the CSRF token bound to the old id
 */

use tower_sessions::Session;

use crate::backend::session::store::SessionError;

/// Session key holding the CSRF token bound to the current session id
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Read and clear a string value in one step (one-shot flash messages)
pub async fn pop_string(session: &Session, key: &str) -> Result<Option<String>, SessionError> {
    if session.get_value(key).await?.is_none() {
        return Ok(None);
    }
    Ok(session.remove::<String>(key).await?)
}

/// Issue a new session id and invalidate the old one in the store.
///
/// The session data carries over, except for the CSRF token.
pub async fn renew_token(session: &Session) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.remove_value(CSRF_TOKEN_KEY).await?;
    tracing::debug!("session token renewed");
    Ok(())
}
