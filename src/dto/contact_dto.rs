use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::lead::ContactDetails;

pub const MAX_NAME_LEN: usize = 25;

static US_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1[-.\s]?)?(\(?\d{3}\)?[-.\s]?)?\d{3}[-.\s]?\d{4}$").expect("phone pattern compiles")
});

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "is required"));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(invalid("too_long", "is too long (max 25 chars)"));
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        return Err(invalid("letters_only", "should contain letters only"));
    }
    Ok(())
}

pub fn validate_us_phone(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || US_PHONE.is_match(value) {
        return Ok(());
    }
    Err(invalid("phone", "Invalid US phone format"))
}

/// Contact form shown before results or when saving favourites.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(custom(function = "validate_person_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_person_name"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_us_phone"))]
    pub phone: String,
}

impl From<ContactRequest> for ContactDetails {
    fn from(req: ContactRequest) -> Self {
        ContactDetails { first_name: req.first_name, last_name: req.last_name, email: req.email, phone: req.phone }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}
