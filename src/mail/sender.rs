//! Message sender abstraction
//!
//! Defines the capability trait for pluggable delivery backends.

use std::sync::Arc;

/// Error reported by a sender. Opaque to the gate.
pub type SendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Something that can attempt delivery of a message
///
/// Implementations own whatever transport state they need. The operation
/// takes `&self`, so mutable state lives behind interior mutability.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSender: Send + Sync {
    /// Attempt to deliver `message` once
    fn send_message(&self, message: &str) -> Result<(), SendError>;
}

impl<T: MessageSender + ?Sized> MessageSender for &T {
    fn send_message(&self, message: &str) -> Result<(), SendError> {
        (**self).send_message(message)
    }
}

impl<T: MessageSender + ?Sized> MessageSender for Box<T> {
    fn send_message(&self, message: &str) -> Result<(), SendError> {
        (**self).send_message(message)
    }
}

impl<T: MessageSender + ?Sized> MessageSender for Arc<T> {
    fn send_message(&self, message: &str) -> Result<(), SendError> {
        (**self).send_message(message)
    }
}
