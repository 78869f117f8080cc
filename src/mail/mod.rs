//! Message sending
//!
//! Sender capability, the message gate, and the email sender built on them.
//!
//! # Overview
//!
//! - [`MessageSender`] - anything that can attempt delivery of a message
//! - [`send_message_if_not_blank`] - the gate: refuses empty messages, delegates the rest
//! - [`EmailSender`] - renders an email and writes it to a sink
//!
//! # Errors
//!
//! The gate distinguishes "nothing was attempted" ([`GateError::EmptyMessage`])
//! from "the sender failed" ([`GateError::Delivery`]). Compare against the
//! variant, never the message text.

mod address;
mod email;
mod gate;
mod sender;

pub use address::{Address, AddressError};
pub use email::{EmailConfig, EmailError, EmailSender};
pub use gate::{send_message_if_not_blank, GateError};
pub use sender::{MessageSender, SendError};
