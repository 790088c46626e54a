//! Session Module
//!
//! Server-side sessions on `tower-sessions`. The session id travels in a
//! cookie; the key/value bag lives in the configured store.
//!
//! # Module Structure
//!
//! ```text
//! session/
//! ├── mod.rs       - Module exports and documentation
//! ├── config.rs    - SessionConfig and the SessionManagerLayer it builds
//! ├── store.rs     - SessionBackend (memory or PostgreSQL), SessionError
//! ├── handle.rs    - Pop and token renewal on top of tower_sessions::Session
//! └── layer.rs     - Save-on-panic middleware inside the session manager
//! ```
//!
//! # Security
//!
//! - The cookie is `HttpOnly`, `SameSite=Lax` and `Secure` unless disabled
//!   for local development
//! - [`renew_token`] cycles the session id, deleting the old record, and
//!   drops the CSRF token bound to it; it is called on every privilege
//!   change (login, logout)

pub mod config;
pub mod handle;
pub mod layer;
pub mod store;

pub use config::{session_layer, SessionConfig, MAX_LIFETIME_HOURS};
pub use handle::{pop_string, renew_token, CSRF_TOKEN_KEY};
pub use layer::save_on_panic;
pub use store::{SessionBackend, SessionError};
pub use tower_sessions::Session;
