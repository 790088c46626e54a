/**
 * Authentication State Machine
 *
 * A session is either Anonymous (no authenticated-user key) or
 * Authenticated (key present). Both transitions rotate the session id
 * first, so an id observed before a privilege change is useless after it.
 *
 * ```text
 * Anonymous --log_in(user_id)--> Authenticated
 * Authenticated --log_out()----> Anonymous
 * ```
 *
 * A failed rotation is returned to the caller and surfaces as a server
 * error; the identity key is never written or cleared without it.
 */

use tower_sessions::Session;

use crate::backend::session::{renew_token, SessionError};

/// Session key holding the authenticated user's id
pub const AUTHENTICATED_USER_KEY: &str = "authenticated_user_id";

/// Session key holding the one-shot flash message
pub const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(i64),
}

impl AuthState {
    /// Read the state recorded in the session
    pub async fn of(session: &Session) -> Result<Self, SessionError> {
        Ok(match session.get::<i64>(AUTHENTICATED_USER_KEY).await? {
            Some(user_id) => Self::Authenticated(user_id),
            None => Self::Anonymous,
        })
    }
}

/// Anonymous -> Authenticated after a successful credential check
pub async fn log_in(session: &Session, user_id: i64) -> Result<(), SessionError> {
    renew_token(session).await?;
    session.insert(AUTHENTICATED_USER_KEY, user_id).await?;
    tracing::info!(user_id, "user logged in");
    Ok(())
}

/// Authenticated -> Anonymous
pub async fn log_out(session: &Session) -> Result<(), SessionError> {
    renew_token(session).await?;
    session.remove_value(AUTHENTICATED_USER_KEY).await?;
    tracing::info!("user logged out");
    Ok(())
}
