//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the user account pages.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Signup and login form types
//! ├── signup.rs   - Registration form and submission
//! ├── login.rs    - Login form and submission
//! └── logout.rs   - Logout
//! ```
//!
//! # Handlers
//!
//! - **`user_signup`** / **`user_signup_post`** - GET/POST /user/signup
//! - **`user_login`** / **`user_login_post`** - GET/POST /user/login
//! - **`user_logout_post`** - POST /user/logout
//!
//! Invalid submissions re-render their form with a 422 status.

/// Form types
pub mod types;

/// Signup handlers
pub mod signup;

/// Login handlers
pub mod login;

/// Logout handler
pub mod logout;

pub use types::{LoginForm, SignupForm};

pub use login::{user_login, user_login_post};
pub use logout::user_logout_post;
pub use signup::{user_signup, user_signup_post};
