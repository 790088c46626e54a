/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by HTTP handlers and
 * middleware, plus the error type returned by the storage collaborators.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * Malformed requests, forged or missing CSRF tokens and bad route
 * parameters. These map to a fixed status with no internal detail.
 *
 * ## Not Found
 *
 * Unknown routes and unknown records. Rendered through the normal page
 * pipeline with a 404 status.
 *
 * ## Server Errors
 *
 * Anything unexpected from a collaborator (database, session store,
 * template engine). Full detail goes to the operator log only.
 *
 * Validation failures are not errors: handlers re-render the originating
 * form with a 422 status instead.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::session::SessionError;
use crate::backend::templates::TemplateError;

/// Errors returned by the snippet and user repositories
#[derive(Debug, Error)]
pub enum ModelError {
    /// No matching record (or the record has expired)
    #[error("no matching record found")]
    NoRecord,

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Unique constraint violation on the users email column
    #[error("duplicate email")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Backend error taxonomy
///
/// Every handler returns `Result<Response, AppError>`. The conversion into an
/// HTTP response lives in `conversion.rs`.
///
/// # Usage
///
/// ```rust
/// use snipbox::backend::error::AppError;
/// use axum::http::StatusCode;
///
/// let err = AppError::bad_request();
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Client error with a fixed status (400, 405, ...)
    #[error("client error: {status}")]
    Client {
        /// HTTP status code for this error
        status: StatusCode,
    },

    /// Unknown route or record
    #[error("not found")]
    NotFound,

    /// Unexpected failure with an operator-facing message
    #[error("server error: {message}")]
    Server {
        /// Human-readable error message (never sent to the client)
        message: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl AppError {
    /// Create a client error with the given status
    pub fn client(status: StatusCode) -> Self {
        Self::Client { status }
    }

    /// Shorthand for a 400 client error
    pub fn bad_request() -> Self {
        Self::client(StatusCode::BAD_REQUEST)
    }

    /// Create a server error
    ///
    /// # Example
    ///
    /// ```rust
    /// use snipbox::backend::error::AppError;
    ///
    /// let err = AppError::server("session manager layer not installed");
    /// ```
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Client` - Uses the status code from the error
    /// - `NotFound` and `Model(NoRecord)` - 404 Not Found
    /// - Everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Client { status } => *status,
            Self::NotFound | Self::Model(ModelError::NoRecord) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors whose detail must only reach the operator log
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Lets handlers use `?` on `tower_sessions::Session` calls
impl From<tower_sessions::session::Error> for AppError {
    fn from(error: tower_sessions::session::Error) -> Self {
        Self::Session(SessionError::from(error))
    }
}
