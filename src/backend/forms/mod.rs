//! Forms Module
//!
//! Binding of urlencoded request bodies into plain structs.
//!
//! # Module Structure
//!
//! ```text
//! forms/
//! ├── mod.rs      - Module exports
//! ├── binder.rs   - serde deserializer over urlencoded pairs
//! └── extract.rs  - PostForm extractor for handlers
//! ```
//!
//! Validation is not done here; handlers run the bound struct through
//! [`crate::shared::Validator`] themselves.

pub mod binder;
pub mod extract;

pub use binder::{check_declaration, decode, BindError};
pub use extract::{decode_post_form, PostForm};
