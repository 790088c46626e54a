/**
 * PostForm Extractor
 *
 * Buffers the request body and binds it with [`decode`]. A malformed
 * submission is rejected with 400 before the handler runs. An invalid
 * destination type is a bug in the handler and panics; the panic is turned
 * into a 500 by the recovery middleware.
 */

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::backend::error::AppError;
use crate::backend::forms::binder::{decode, BindError};

/// Form body bound into `T`
#[derive(Debug, Clone)]
pub struct PostForm<T>(pub T);

/// Bind a buffered body, panicking on an invalid destination type
pub fn decode_post_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    match decode(body) {
        Ok(form) => Ok(form),
        Err(BindError::Malformed(reason)) => {
            tracing::debug!(%reason, "rejecting malformed form submission");
            Err(AppError::bad_request())
        }
        Err(BindError::InvalidDeclaration(reason)) => {
            panic!("invalid form destination {}: {}", std::any::type_name::<T>(), reason)
        }
    }
}

fn is_urlencoded(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

impl<T, S> FromRequest<S> for PostForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Any other content type binds as an empty form.
        let body = if is_urlencoded(&request) {
            Bytes::from_request(request, state).await.map_err(|e| {
                tracing::debug!(error = %e, "failed to read form body");
                AppError::bad_request()
            })?
        } else {
            Bytes::new()
        };

        decode_post_form(&body).map(PostForm)
    }
}
