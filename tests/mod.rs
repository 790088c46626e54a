//! Test suite for Snipbox
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
