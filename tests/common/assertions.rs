//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
///
/// Usable in expression position, e.g. as a match arm.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack = &$haystack;
        assert!(
            haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            haystack,
            $needle
        )
    }};
}

/// Assert that a string does not contain a substring
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack = &$haystack;
        assert!(
            !haystack.contains($needle),
            "Expected '{}' not to contain '{}'",
            haystack,
            $needle
        )
    }};
}

/// Assert that a response is a 303 redirect to the given location
#[macro_export]
macro_rules! assert_see_other {
    ($response:expr, $location:expr) => {{
        let response = &$response;
        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::SEE_OTHER,
            "Expected 303 See Other, got {} with body '{}'",
            response.status_code(),
            response.text()
        );
        assert_eq!(
            $crate::common::ResponseExt::redirect_location(response).as_deref(),
            Some($location)
        )
    }};
}
