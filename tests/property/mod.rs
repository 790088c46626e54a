//! Property-based tests

mod binder_proptest;
