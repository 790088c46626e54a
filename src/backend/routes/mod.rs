//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server and the
//! middleware chains wrapped around them.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs      - Module exports and documentation
//! ├── router.rs   - Main router creation
//! └── chain.rs    - Standard, dynamic and protected middleware chains
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use snipbox::backend::routes::create_router;
//! use snipbox::backend::server::{create_state, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = create_state(&ServerConfig::from_env()?).await?;
//! let router = create_router(state);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// Middleware chain composition
pub mod chain;

pub use router::create_router;
