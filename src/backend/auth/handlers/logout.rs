/**
 * Logout Handler
 *
 * `POST /user/logout` moves the session back to Anonymous and sends the
 * visitor home with a flash message.
 */

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::backend::auth::state::log_out;
use crate::backend::auth::FLASH_KEY;
use crate::backend::error::AppError;

pub async fn user_logout_post(session: Session) -> Result<Response, AppError> {
    log_out(&session).await?;
    session
        .insert(FLASH_KEY, "You've been logged out successfully!")
        .await?;
    Ok(Redirect::to("/").into_response())
}
