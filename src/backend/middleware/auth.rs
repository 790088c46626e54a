/**
 * Authentication Middleware
 *
 * Two layers sit on top of the session:
 *
 * - [`authenticate`] runs on every dynamic route. It reads the identity key
 *   from the session and attaches an [`AuthContext`] to the request, so
 *   handlers and templates know whether someone is logged in.
 * - [`require_authentication`] wraps the protected routes. Anonymous requests
 *   are redirected to the login page and never reach the handler.
 *
 * Whether `authenticate` re-checks that the user still exists on every
 * request is controlled by [`AuthPolicy`].
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{HeaderValue, CACHE_CONTROL},
        request::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use tower_sessions::Session;

use crate::backend::auth::AuthState;
use crate::backend::error::AppError;
use crate::backend::server::state::AppState;

/// Login entry point anonymous visitors are sent to
pub const LOGIN_PATH: &str = "/user/login";

/// Per-request authentication result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user_id: Option<i64>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: i64) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id),
        }
    }
}

/// How much `authenticate` trusts the identity stored in the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Confirm the user still exists on every request
    #[default]
    RecheckUser,
    /// Accept the session's identity as-is
    TrustSession,
}

impl AuthPolicy {
    pub fn from_recheck(recheck: bool) -> Self {
        if recheck {
            Self::RecheckUser
        } else {
            Self::TrustSession
        }
    }
}

/// Auth derivation middleware
///
/// Must run inside the session manager layer. A user that no longer exists
/// is treated as anonymous; a storage failure during the check is a 500.
pub async fn authenticate(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return AppError::server("authentication requires the session manager layer")
            .into_response();
    };

    let state = match AuthState::of(&session).await {
        Ok(state) => state,
        Err(e) => return AppError::from(e).into_response(),
    };

    let auth = match state {
        AuthState::Anonymous => AuthContext::anonymous(),
        AuthState::Authenticated(user_id) => match app_state.auth_policy {
            AuthPolicy::TrustSession => AuthContext::user(user_id),
            AuthPolicy::RecheckUser => match app_state.users.exists(user_id).await {
                Ok(true) => AuthContext::user(user_id),
                Ok(false) => {
                    tracing::warn!(user_id, "session references a user that no longer exists");
                    AuthContext::anonymous()
                }
                Err(e) => return AppError::from(e).into_response(),
            },
        },
    };

    request.extensions_mut().insert(auth);
    next.run(request).await
}

/// Auth enforcement middleware
///
/// Responses are marked `Cache-Control: no-store` so a cache never serves a
/// protected page to someone else.
pub async fn require_authentication(request: Request, next: Next) -> Response {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .copied()
        .unwrap_or_default();

    let mut response = if auth.is_authenticated {
        next.run(request).await
    } else {
        tracing::debug!(uri = %request.uri(), "redirecting anonymous request to login");
        Redirect::to(LOGIN_PATH).into_response()
    };

    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Axum extractor for the auth context set by [`authenticate`]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().copied().ok_or_else(|| {
            tracing::error!("AuthContext not found in request extensions");
            AppError::server("authentication middleware not installed")
        })
    }
}
