//! Snipbox - Main Library
//!
//! Snipbox is a session-authenticated snippet sharing server built on Axum.
//! Visitors browse short-lived text snippets; registered users log in to
//! create new ones.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP dependency
//!   - Form validation predicates and the `Validator` error state
//!
//! - **`backend`** - Everything that runs behind the HTTP listener
//!   - Middleware chains (panic recovery, logging, security headers,
//!     session load/save, CSRF, authentication)
//!   - Session store and auth state machine
//!   - Form binder, template render cache, route handlers
//!   - PostgreSQL and in-memory storage collaborators
//!
//! # Usage
//!
//! ```rust,no_run
//! use snipbox::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Request Pipeline
//!
//! ```text
//! recover -> log -> secure headers -> not-found page -> router
//!     -> session load/save -> CSRF -> authenticate [-> require auth] -> handler
//! ```
//!
//! Panic recovery and security headers always wrap outside the session,
//! CSRF and authentication layers.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
