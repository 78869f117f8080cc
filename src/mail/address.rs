//! Email addressing
//!
//! Validated `local@domain` addresses for the sender and recipients of an email.
//!
//! # Examples
//!
//! ```
//! use mailgate::mail::Address;
//!
//! let addr: Address = "bar@example.com".parse().unwrap();
//! assert_eq!(addr.local_part(), "bar");
//! assert_eq!(addr.domain(), "example.com");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for address parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address format: expected 'local@domain', got '{0}'")]
    InvalidFormat(String),

    #[error("address local part cannot be empty")]
    EmptyLocalPart,

    #[error("address domain cannot be empty")]
    EmptyDomain,

    #[error("address local part is invalid: '{0}'")]
    InvalidLocalPart(String),

    #[error("address domain is invalid: '{0}'")]
    InvalidDomain(String),
}

/// A validated email address
///
/// The local part may contain ASCII alphanumerics and `. _ - +`, but may not
/// begin or end with a dot. The domain is a dot-separated list of non-empty
/// labels made of ASCII alphanumerics and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    local: String,
    domain: String,
}

impl Address {
    /// Create a new address from parts
    ///
    /// # Errors
    /// Returns an error if either part is empty or malformed.
    pub fn new(local: impl Into<String>, domain: impl Into<String>) -> Result<Self, AddressError> {
        let local = local.into();
        let domain = domain.into();

        Self::validate_local_part(&local)?;
        Self::validate_domain(&domain)?;

        Ok(Self { local, domain })
    }

    /// Get the local part of the address
    pub fn local_part(&self) -> &str {
        &self.local
    }

    /// Get the domain of the address
    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn validate_local_part(local: &str) -> Result<(), AddressError> {
        if local.is_empty() {
            return Err(AddressError::EmptyLocalPart);
        }

        let allowed = local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'));
        if !allowed || local.starts_with('.') || local.ends_with('.') {
            return Err(AddressError::InvalidLocalPart(local.to_string()));
        }

        Ok(())
    }

    fn validate_domain(domain: &str) -> Result<(), AddressError> {
        if domain.is_empty() {
            return Err(AddressError::EmptyDomain);
        }

        let valid_label = |label: &str| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        };

        if !domain.split('.').all(valid_label) {
            return Err(AddressError::InvalidDomain(domain.to_string()));
        }

        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((local, domain)) if !domain.contains('@') => Self::new(local, domain),
            _ => Err(AddressError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}
