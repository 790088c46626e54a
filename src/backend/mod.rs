//! Backend Module
//!
//! This module contains all server-side code for Snipbox: the Axum server,
//! its middleware chains, sessions, forms, templates and storage.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - Router assembly and middleware chain composition
//! - **`middleware`** - Panic recovery, logging, headers, not-found, auth
//! - **`session`** - Session store backends, the session layer and save-on-panic
//! - **`csrf`** - Anti-forgery token guard
//! - **`auth`** - Users, login state machine, account handlers
//! - **`snippets`** - Snippet storage and page handlers
//! - **`forms`** - Urlencoded form binder
//! - **`templates`** - Template render cache and page data
//! - **`error`** - Backend error taxonomy and response conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Router and middleware chains
//! ├── middleware/     - Request middleware
//! ├── session/        - Session store and middleware
//! ├── csrf.rs         - CSRF guard
//! ├── auth/           - Authentication
//! ├── snippets/       - Snippets
//! ├── forms/          - Form binding
//! ├── templates/      - Page rendering
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` is built once at startup and cloned into every handler. It
//! holds only shared, read-mostly collaborators; per-request data (the
//! session handle, the auth context) travels in request extensions.
//!
//! # Error Handling
//!
//! Handlers return `Result<Response, AppError>`. Client errors map to a
//! fixed status, not-found renders the not-found page, and everything else
//! is logged and answered with a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Server-side sessions
pub mod session;

/// CSRF protection
pub mod csrf;

/// Authentication and user management
pub mod auth;

/// Snippet storage and handlers
pub mod snippets;

/// Form binding
pub mod forms;

/// Template rendering
pub mod templates;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::AppError;
pub use server::{create_app, AppState, ServerConfig};
