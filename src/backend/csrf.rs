/**
 * CSRF Guard
 *
 * Every session carries one anti-forgery token, issued the first time a
 * page asks for it and stable until the session id rotates. Forms embed
 * it in a hidden `csrf_token` field; non-form clients may send it in the
 * `X-CSRF-Token` header.
 *
 * State-changing requests (anything but GET, HEAD, OPTIONS and TRACE) are
 * rejected with 400 before they reach the handler when the submitted token
 * is missing or does not match. The comparison is constant-time.
 */

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::backend::error::AppError;
use crate::backend::session::{SessionError, CSRF_TOKEN_KEY};

/// Hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

/// Header accepted as an alternative to the form field
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

/// Largest form body buffered while looking for the token
pub const MAX_FORM_BYTES: usize = 1024 * 1024;

/// Number of random bytes behind every token
const TOKEN_BYTES: usize = 32;

/// Generate an unguessable URL-safe token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Token for embedding in the page being rendered, issued on first use
pub async fn token(session: &Session) -> Result<String, SessionError> {
    if let Some(token) = session.get::<String>(CSRF_TOKEN_KEY).await? {
        return Ok(token);
    }
    let token = generate_token();
    session.insert(CSRF_TOKEN_KEY, &token).await?;
    Ok(token)
}

fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn tokens_match(expected: &str, submitted: &str) -> bool {
    expected.as_bytes().ct_eq(submitted.as_bytes()).into()
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Pull the submitted token out of the header or the form body.
///
/// The body is buffered and put back so the handler can still decode it.
async fn submitted_token(request: Request) -> Result<(Option<String>, Request), AppError> {
    if let Some(value) = request.headers().get(&CSRF_HEADER) {
        let token = value.to_str().ok().map(str::to_string);
        return Ok((token, request));
    }

    if !is_form(&request) {
        return Ok((None, request));
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES).await.map_err(|e| {
        tracing::warn!(error = %e, "failed to buffer form body");
        AppError::bad_request()
    })?;

    let token = form_urlencoded::parse(&bytes)
        .find(|(key, _)| key == CSRF_FIELD)
        .map(|(_, value)| value.into_owned());

    Ok((token, Request::from_parts(parts, Body::from(bytes))))
}

/// CSRF verification middleware
///
/// Must run inside the session manager layer. Reading the expected token
/// never issues one, so a rejected request leaves the session untouched.
pub async fn verify_csrf(request: Request, next: Next) -> Response {
    if is_safe_method(request.method()) {
        return next.run(request).await;
    }

    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return AppError::server("CSRF check requires the session manager layer").into_response();
    };

    let (submitted, request) = match submitted_token(request).await {
        Ok(found) => found,
        Err(e) => return e.into_response(),
    };

    let expected = match session.get::<String>(CSRF_TOKEN_KEY).await {
        Ok(expected) => expected,
        Err(e) => return AppError::from(SessionError::from(e)).into_response(),
    };
    let valid = match (expected.as_deref(), submitted.as_deref()) {
        (Some(expected), Some(submitted)) => tokens_match(expected, submitted),
        _ => false,
    };

    if !valid {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            token_present = submitted.is_some(),
            "rejecting request with missing or invalid CSRF token"
        );
        return AppError::bad_request().into_response();
    }

    next.run(request).await
}
