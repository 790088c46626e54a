//! Integration tests
//!
//! Drive the full router over in-memory stores

mod auth_test;
mod middleware_test;
