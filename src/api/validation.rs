//! Form validation, run before anything touches the network.
//!
//! Rules follow the backend's binding contract; failures are returned as
//! structured field errors and never produce a request.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::NewEvent;

lazy_static! {
    /// Good-enough email shape check; the backend has the final say.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    finish(errors)
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if username.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if username.chars().count() < 3 {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters",
        ));
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    finish(errors)
}

pub fn validate_event(event: &NewEvent) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if event.name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if event.description.is_empty() {
        errors.push(FieldError::new("description", "Description is required"));
    }
    if event.category.is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }
    if event.location.is_empty() {
        errors.push(FieldError::new("location", "Location is required"));
    }
    if event.image.is_empty() {
        errors.push(FieldError::new("image", "Image is required"));
    }
    if !event.price.is_finite() || event.price < 0.0 {
        errors.push(FieldError::new("price", "Price must be zero or positive"));
    }
    finish(errors)
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_REGEX.is_match(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn check_password(errors: &mut Vec<FieldError>, password: &str) {
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
