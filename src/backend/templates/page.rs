/**
 * Page Responses
 *
 * The status line is only decided after the page has rendered completely,
 * so a render failure becomes a clean 500 instead of a 200 with a truncated
 * body.
 */

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::backend::error::AppError;
use crate::backend::templates::{TemplateCache, TemplateData};

/// Render `page` and wrap it in a response with `status`
pub fn render_page(
    cache: &TemplateCache,
    status: StatusCode,
    page: &str,
    data: &TemplateData,
) -> Result<Response, AppError> {
    let body = cache.render(page, data)?;
    Ok((status, Html(body)).into_response())
}
