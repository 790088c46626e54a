//! Form Validation
//!
//! A reusable validation state plus a set of pure predicates. Form records
//! hold a [`Validator`] value and call [`Validator::check_field`] with the
//! result of a predicate; the first failure recorded for a field wins.
//!
//! # Example
//!
//! ```rust
//! use snipbox::shared::validator::{self, Validator};
//!
//! let mut v = Validator::default();
//! v.check_field(validator::not_blank("  "), "title", "This field cannot be blank");
//! v.check_field(validator::max_chars("  ", 100), "title", "Too long");
//! assert!(!v.valid());
//! assert_eq!(v.field_error("title"), Some("This field cannot be blank"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Pattern used for email fields on the signup and login forms.
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Accumulated validation errors for one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validator {
    /// Errors attributable to the form as a whole
    pub non_field_errors: Vec<String>,
    /// First error recorded for each named field
    pub field_errors: HashMap<String, String>,
}

impl Validator {
    /// True when no field or non-field error has been recorded
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` for `key` unless the field already has an error
    pub fn add_field_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Record `message` for `key` when `ok` is false
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }
}

/// True when the value contains something other than whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value has at most `n` characters
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True when the value has at least `n` characters
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True when the value is one of the permitted values
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}
