//! mailgate - send a message only when there is something to send
//!
//! A message is handed to a pluggable [`mail::MessageSender`] through the
//! message gate, which refuses empty messages before any delivery is attempted.
//!
//! # Architecture
//!
//! - **mail**: Sender capability, the message gate, addressing, email rendering
//! - **config**: YAML configuration with default email settings
//! - **logging**: tracing subscriber setup
//! - **error**: Crate-wide error type

pub mod config;
pub mod error;
pub mod logging;
pub mod mail;

// Re-exports
pub use error::{MailGateError, Result};
pub use mail::{send_message_if_not_blank, GateError, MessageSender, SendError};
