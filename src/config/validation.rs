//! Configuration validation
//!
//! Validates mailgate configuration for correctness:
//! - Email settings have at least one recipient
//! - No duplicate recipients, sender not mailing itself
//! - Subject is set and fits on one line
//! - Log filter parses

use super::mailgate_config::MailGateConfig;
use crate::mail::EmailConfig;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

/// Validation error details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a mailgate configuration, collecting every problem found
pub fn validate_config(config: &MailGateConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(ref email) = config.email {
        validate_email(email, &mut errors);
    }

    if config.log_filter.trim().is_empty() {
        errors.push(ValidationError::new("log_filter", "Log filter cannot be empty"));
    } else if EnvFilter::try_new(&config.log_filter).is_err() {
        errors.push(ValidationError::new(
            "log_filter",
            format!("Invalid log filter '{}'", config.log_filter),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a configuration, converting failures into a single error
pub fn validate_config_result(config: &MailGateConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        crate::MailGateError::Config(format!(
            "Configuration validation failed:\n  {}",
            messages.join("\n  ")
        ))
    })
}

fn validate_email(email: &EmailConfig, errors: &mut Vec<ValidationError>) {
    if email.to.is_empty() {
        errors.push(ValidationError::new(
            "email.to",
            "At least one recipient must be defined",
        ));
    }

    let mut seen = HashSet::new();
    for addr in &email.to {
        if !seen.insert(addr) {
            errors.push(ValidationError::new(
                "email.to",
                format!("Duplicate recipient: {}", addr),
            ));
        }
        if *addr == email.from {
            errors.push(ValidationError::new(
                "email.to",
                format!("Sender {} is also a recipient", addr),
            ));
        }
    }

    if email.subject.is_empty() {
        errors.push(ValidationError::new("email.subject", "Subject cannot be empty"));
    } else if email.subject.contains(['\r', '\n']) {
        errors.push(ValidationError::new(
            "email.subject",
            "Subject must be a single line",
        ));
    }
}
