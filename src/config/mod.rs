//! Configuration system
//!
//! Loads ~/.config/mailgate/config.yaml with support for:
//! - Default email envelope (from, to, subject)
//! - Log filter fallback when RUST_LOG is unset

mod mailgate_config;
pub mod validation;

pub use mailgate_config::MailGateConfig;
pub use validation::{validate_config, validate_config_result, ValidationError};
