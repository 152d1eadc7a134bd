use anyhow::{Result, bail};
use std::thread;
use std::time::Duration;

use crate::models::Job;

// Accepted contact number lengths, digits only, inclusive.
const CONTACT_MIN_DIGITS: usize = 10;
const CONTACT_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

pub fn validate_required(value: &str, field_name: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return Some(ValidationError::new(
            field_name,
            format!("{} is required", field_name),
        ));
    }
    None
}

pub fn validate_name(name: &str) -> Option<ValidationError> {
    validate_required(name, "Name")
}

pub fn validate_email(email: &str) -> Option<ValidationError> {
    if let Some(error) = validate_required(email, "Email") {
        return Some(error);
    }
    if !is_valid_email(email) {
        return Some(ValidationError::new(
            "Email",
            "Please enter a valid email address".to_string(),
        ));
    }
    None
}

// local@domain.tld: exactly one '@', no whitespace, and the domain must
// carry a non-empty extension after a '.'.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((host, extension)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !extension.is_empty()
}

pub fn validate_contact_number(contact_number: &str) -> Option<ValidationError> {
    if let Some(error) = validate_required(contact_number, "Contact number") {
        return Some(error);
    }
    if !contact_number.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(
            "Contact number",
            "Contact number must contain only digits".to_string(),
        ));
    }
    let digits = contact_number.len();
    if !(CONTACT_MIN_DIGITS..=CONTACT_MAX_DIGITS).contains(&digits) {
        return Some(ValidationError::new(
            "Contact number",
            format!(
                "Contact number must be between {} and {} digits",
                CONTACT_MIN_DIGITS, CONTACT_MAX_DIGITS
            ),
        ));
    }
    None
}

pub fn validate_min_length(
    value: &str,
    field_name: &str,
    min_length: usize,
) -> Option<ValidationError> {
    if let Some(error) = validate_required(value, field_name) {
        return Some(error);
    }
    if value.trim().chars().count() < min_length {
        return Some(ValidationError::new(
            field_name,
            format!("{} must be at least {} characters", field_name, min_length),
        ));
    }
    None
}

/// The application form for one posting. The screen rendering it is out of
/// scope; the validation contract and the mocked submission are not.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub why_hire_you: String,
}

impl ApplicationForm {
    /// All field errors, in field order. Empty means the form may submit.
    pub fn validate(&self) -> Vec<ValidationError> {
        [
            validate_name(&self.name),
            validate_email(&self.email),
            validate_contact_number(&self.contact_number),
            validate_min_length(&self.why_hire_you, "Why should we hire you", 20),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Stub collaborator: no real endpoint exists, so submission is a short
    /// fixed delay followed by a success acknowledgment.
    pub fn submit(&self, job: &Job) -> Result<String> {
        let errors = self.validate();
        if !errors.is_empty() {
            bail!("application form has {} unresolved error(s)", errors.len());
        }
        thread::sleep(Duration::from_millis(1200));
        Ok(format!(
            "Application submitted successfully for {} at {}!",
            job.title, job.company
        ))
    }
}
