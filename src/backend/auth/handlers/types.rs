/**
 * Authentication Form Types
 *
 * The signup and login form bodies. Each form carries its own
 * [`Validator`]; the validator is never read from the request, and the
 * password is never echoed back into a re-rendered form.
 */

use serde::{Deserialize, Serialize};

use crate::shared::validator::{self, Validator, EMAIL_RX};

/// Minimum password length at signup
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Body of `POST /user/signup`
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SignupForm {
    /// Display name
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// Plain-text password, hashed before storage
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl SignupForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            validator::not_blank(&self.name),
            "name",
            "This field cannot be blank",
        );
        v.check_field(
            validator::not_blank(&self.email),
            "email",
            "This field cannot be blank",
        );
        v.check_field(
            validator::matches(&self.email, &EMAIL_RX),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(
            validator::not_blank(&self.password),
            "password",
            "This field cannot be blank",
        );
        v.check_field(
            validator::min_chars(&self.password, MIN_PASSWORD_CHARS),
            "password",
            "This field must be at least 8 characters long",
        );
    }
}

/// Body of `POST /user/login`
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl LoginForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            validator::not_blank(&self.email),
            "email",
            "This field cannot be blank",
        );
        v.check_field(
            validator::matches(&self.email, &EMAIL_RX),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(
            validator::not_blank(&self.password),
            "password",
            "This field cannot be blank",
        );
    }
}
