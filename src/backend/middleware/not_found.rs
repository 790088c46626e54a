/**
 * Not-Found Page Middleware
 *
 * Swaps the body of any response tagged with [`NotFoundPage`] for the
 * rendered `not_found` page. Status and headers (including a session cookie
 * set further in) are kept.
 */

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::backend::error::{AppError, NotFoundPage};
use crate::backend::templates::{TemplateCache, TemplateData};

pub const NOT_FOUND_PAGE: &str = "not_found";

pub async fn render_not_found(
    State(templates): State<Arc<TemplateCache>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.extensions().get::<NotFoundPage>().is_none() {
        return response;
    }

    let body = match templates.render(NOT_FOUND_PAGE, &TemplateData::not_found()) {
        Ok(body) => body,
        Err(e) => return AppError::from(e).into_response(),
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Response::from_parts(parts, Body::from(body))
}
