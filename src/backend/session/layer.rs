/**
 * Save-on-Panic Middleware
 *
 * Sits directly inside `SessionManagerLayer`. The manager saves the session
 * after the inner service returns, which never happens when a handler
 * panics. This layer catches the panic only long enough to save a modified
 * session, then resumes it so the outermost recovery layer handles it. The
 * backtrace captured at the panic site goes along, since the save may finish
 * on another worker thread.
 *
 * It also marks dynamic responses `Vary: Cookie`, since their content
 * depends on the session.
 */

use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::{header::VARY, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use tower_sessions::Session;

use crate::backend::error::AppError;
use crate::backend::middleware::recover::{resume_panic, take_panic_backtrace};

/// Session save on the unwind path
///
/// Must run inside the session manager layer.
pub async fn save_on_panic(request: Request, next: Next) -> Response {
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return AppError::server("session manager layer not installed").into_response();
    };

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(mut response) => {
            response
                .headers_mut()
                .append(VARY, HeaderValue::from_static("Cookie"));
            response
        }
        Err(panic) => {
            let backtrace = take_panic_backtrace();
            if session.is_modified() {
                if let Err(e) = session.save().await {
                    tracing::error!(error = %e, "failed to save session after panic");
                }
            }
            resume_panic(panic, backtrace)
        }
    }
}
