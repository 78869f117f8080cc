//! Error types for mailgate
//!
//! Collects the per-module errors into one enum for the CLI and config layer.
//! Uses thiserror for ergonomic error handling.

use crate::mail::{AddressError, EmailError, GateError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mailgate operations
pub type Result<T> = std::result::Result<T, MailGateError>;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum MailGateError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No configuration file at the given path
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Address parsing errors
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Email construction errors
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Message gate errors (empty message or delivery failure)
    #[error("Send error: {0}")]
    Gate(#[from] GateError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MailGateError {
    /// True when the error is the gate refusing an empty message
    pub fn is_empty_message(&self) -> bool {
        matches!(self, MailGateError::Gate(e) if e.is_empty_message())
    }
}
