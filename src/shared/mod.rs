//! Shared Module
//!
//! Types with no HTTP dependency. Everything here can be used from the
//! backend handlers as well as from tests without building a router.

/// Form validation state and predicates
pub mod validator;

pub use validator::Validator;
