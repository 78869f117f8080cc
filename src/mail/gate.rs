//! Message gate
//!
//! Refuses empty messages and hands everything else to a [`MessageSender`]
//! exactly once, passing the sender's outcome back untouched.
//!
//! # Example
//!
//! ```
//! use mailgate::mail::{send_message_if_not_blank, GateError, MessageSender, SendError};
//!
//! struct Discard;
//!
//! impl MessageSender for Discard {
//!     fn send_message(&self, _message: &str) -> Result<(), SendError> {
//!         Ok(())
//!     }
//! }
//!
//! assert!(send_message_if_not_blank(&Discard, "hello").is_ok());
//! assert!(matches!(
//!     send_message_if_not_blank(&Discard, ""),
//!     Err(GateError::EmptyMessage)
//! ));
//! ```

use super::sender::{MessageSender, SendError};
use thiserror::Error;

/// Outcome of a refused or failed send
#[derive(Debug, Error)]
pub enum GateError {
    /// Nothing was attempted because the message was empty
    #[error("the message was empty")]
    EmptyMessage,

    /// The sender was invoked and reported this error
    #[error("delivery failed: {0}")]
    Delivery(#[source] SendError),
}

impl GateError {
    /// True if no delivery was attempted
    pub fn is_empty_message(&self) -> bool {
        matches!(self, GateError::EmptyMessage)
    }

    /// The sender's own error, if delivery was attempted
    pub fn into_delivery_error(self) -> Option<SendError> {
        match self {
            GateError::Delivery(e) => Some(e),
            GateError::EmptyMessage => None,
        }
    }
}

/// Send `message` through `sender` unless it is empty
///
/// Emptiness is an exact zero-length check; whitespace-only messages are sent.
///
/// # Errors
/// - [`GateError::EmptyMessage`] if `message` is empty. The sender is not called.
/// - [`GateError::Delivery`] carrying the sender's error if delivery failed.
pub fn send_message_if_not_blank<S>(sender: &S, message: &str) -> Result<(), GateError>
where
    S: MessageSender + ?Sized,
{
    if message.is_empty() {
        tracing::info!("Empty message - not sending anything");
        return Err(GateError::EmptyMessage);
    }

    tracing::info!(len = message.len(), "Sending message");
    sender.send_message(message).map_err(GateError::Delivery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::sender::MockMessageSender;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug)]
    struct NotSent;

    impl fmt::Display for NotSent {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Message was not sent")
        }
    }

    impl Error for NotSent {}

    #[test]
    fn test_empty_message_never_reaches_sender() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message().never();

        let result = send_message_if_not_blank(&mock, "");
        assert!(matches!(result, Err(GateError::EmptyMessage)));
    }

    #[test]
    fn test_message_sent_once() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message()
            .withf(|m| m == "hello")
            .times(1)
            .returning(|_| Ok(()));

        assert!(send_message_if_not_blank(&mock, "hello").is_ok());
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message()
            .withf(|m| m == "  ")
            .times(1)
            .returning(|_| Ok(()));

        assert!(send_message_if_not_blank(&mock, "  ").is_ok());
    }

    #[test]
    fn test_sender_error_passes_through() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message()
            .times(1)
            .returning(|_| Err(NotSent.into()));

        let err = send_message_if_not_blank(&mock, "hello").unwrap_err();
        assert!(!err.is_empty_message());
        assert!(err.source().is_some_and(|s| s.is::<NotSent>()));

        let inner = err.into_delivery_error().expect("delivery error");
        assert!(inner.downcast_ref::<NotSent>().is_some());
    }

    #[test]
    fn test_repeated_sends_each_reach_sender() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message().times(2).returning(|_| Ok(()));

        assert!(send_message_if_not_blank(&mock, "again").is_ok());
        assert!(send_message_if_not_blank(&mock, "again").is_ok());
    }

    #[test]
    fn test_trait_object_sender() {
        let mut mock = MockMessageSender::new();
        mock.expect_send_message().times(1).returning(|_| Ok(()));

        let sender: &dyn MessageSender = &mock;
        assert!(send_message_if_not_blank(sender, "dyn").is_ok());
    }

    #[test]
    fn test_empty_message_display() {
        assert_eq!(GateError::EmptyMessage.to_string(), "the message was empty");
        assert!(GateError::EmptyMessage.into_delivery_error().is_none());
    }
}
