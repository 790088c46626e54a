//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server. The
//! layers are composed into chains in [`crate::backend::routes::chain`].
//!
//! # Architecture
//!
//! - **`recover`** - Catches panics and answers 500
//! - **`logging`** - Request span for the trace layer
//! - **`headers`** - Security headers on every response
//! - **`not_found`** - Renders the not-found page for tagged 404s
//! - **`auth`** - Auth derivation and enforcement
//!
//! Session handling and CSRF verification live with their own modules
//! ([`crate::backend::session::save_on_panic`],
//! [`crate::backend::csrf::verify_csrf`]).

pub mod auth;
pub mod headers;
pub mod logging;
pub mod not_found;
pub mod recover;

pub use auth::{authenticate, require_authentication, AuthContext, AuthPolicy};
pub use headers::{apply_security_headers, secure_headers};
pub use logging::request_span;
pub use not_found::render_not_found;
pub use recover::{install_panic_hook, recover_panic};
