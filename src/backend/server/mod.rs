//! Server Module
//!
//! Startup for the Snipbox server: read configuration, pick storage, compile
//! templates and hand a ready `Router` to `main`.
//!
//! - **`state`** - The `AppState` dependency container
//! - **`config`** - Environment-driven `ServerConfig`
//! - **`init`** - Storage selection and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig, builder and environment loading
//! └── init.rs         - Storage selection, session cleanup, app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Storage**: PostgreSQL with migrations, or in-memory collaborators
//! 3. **Templates**: compile every page up front
//! 4. **Background Tasks**: periodic expired-session cleanup
//! 5. **Router Creation**: routes and middleware chains
//!
//! # Example
//!
//! ```rust,no_run
//! use snipbox::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, create_state, InitError};
pub use state::AppState;
