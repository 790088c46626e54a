/**
 * Error Conversion
 *
 * `AppError` implements `IntoResponse`, so handlers and middleware can
 * return it directly.
 *
 * # Response Format
 *
 * - Client errors: the status code with its canonical reason phrase as a
 *   plain-text body.
 * - Not found: a 404 tagged with [`NotFoundPage`]; the standard middleware
 *   chain swaps in the rendered `not_found` page.
 * - Server errors: logged with full detail, answered with a generic
 *   "Internal Server Error".
 */

use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::AppError;

/// Response extension marking a 404 that should be rendered as a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundPage;

/// Plain-text response carrying only the canonical reason phrase
pub fn status_text(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    (status, reason.to_string()).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::NOT_FOUND {
            let mut response = status_text(status);
            response.extensions_mut().insert(NotFoundPage);
            return response;
        }

        if self.is_server_error() {
            let mut detail = self.to_string();
            let mut source = self.source();
            while let Some(cause) = source {
                detail.push_str(": ");
                detail.push_str(&cause.to_string());
                source = cause.source();
            }
            tracing::error!(error = %detail, "request failed with server error");
        } else {
            tracing::debug!(status = %status, "request rejected with client error");
        }

        status_text(status)
    }
}
