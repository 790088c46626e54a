//! Backend Error Module
//!
//! This module defines the error taxonomy shared by handlers and middleware,
//! and how each error becomes an HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - AppError and ModelError definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `Client` - malformed request, bad CSRF token (fixed status, no detail)
//! - `NotFound` - unknown route or record (rendered 404 page)
//! - `Server` - unexpected collaborator failure (logged, generic 500)
//! - `Model`, `Session`, `Template` - wrapped lower-layer errors

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::{status_text, NotFoundPage};
pub use types::{AppError, ModelError};
