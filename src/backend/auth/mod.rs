//! Authentication Module
//!
//! This module handles user registration, login and logout on top of
//! server-side sessions.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User data model and storage
//! - **`state`** - Anonymous/Authenticated session state machine
//! - **`handlers`** - HTTP handlers for the account pages
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, UserRepository, stores
//! ├── state.rs        - AuthState, log_in, log_out
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Form types
//!     ├── signup.rs   - Registration
//!     ├── login.rs    - Login
//!     └── logout.rs   - Logout
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email, password -> user created -> redirect to login
//! 2. **Login**: credentials verified -> token rotated -> identity stored
//! 3. **Logout**: token rotated -> identity removed
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - The session token rotates on every login and logout
//! - Invalid credentials give one generic message (no information leakage)

/// User data model and storage
pub mod users;

/// Session authentication state machine
pub mod state;

/// HTTP handlers for the account pages
pub mod handlers;

pub use state::{log_in, log_out, AuthState, AUTHENTICATED_USER_KEY, FLASH_KEY};
pub use users::{MemoryUsers, PgUsers, User, UserRepository};
