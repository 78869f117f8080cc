//! Email sender
//!
//! Renders a plain-text email from an [`EmailConfig`] and a message body and
//! writes it to any [`Write`] sink, such as stdout or a spool file handed in by
//! the caller. No network transport is involved.
//!
//! Rendered layout:
//! ```text
//! From: foo@example.com
//! To: bar@example.com, baz@example.com
//! Subject: [EXTERNAL] - SUPER important
//! Date: Tue, 15 Jul 2025 10:52:37 +0000
//! Message-ID: <1752576757000000000.4242@host>
//! MIME-Version: 1.0
//! Content-Type: text/plain; charset=utf-8
//!
//! body...
//! ```
//! Every line ends in CRLF.

use super::gate::{send_message_if_not_blank, GateError};
use super::sender::{MessageSender, SendError};
use super::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;

/// Email construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email has no recipients")]
    NoRecipients,

    #[error("{header} header contains a line break")]
    HeaderInjection { header: &'static str },
}

/// Envelope settings for outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Sender address
    pub from: Address,

    /// Recipient addresses (at least one)
    pub to: Vec<Address>,

    /// Subject line
    #[serde(default)]
    pub subject: String,
}

impl EmailConfig {
    /// Create a new email configuration
    ///
    /// # Errors
    /// Returns [`EmailError::NoRecipients`] if `to` is empty.
    pub fn new(
        from: Address,
        to: Vec<Address>,
        subject: impl Into<String>,
    ) -> Result<Self, EmailError> {
        if to.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        Ok(Self {
            from,
            to,
            subject: subject.into(),
        })
    }

    /// Render a complete email with `body` dated `date`
    pub fn render(&self, body: &str, date: DateTime<Utc>) -> Result<String, EmailError> {
        if self.to.is_empty() {
            return Err(EmailError::NoRecipients);
        }
        if self.subject.contains(['\r', '\n']) {
            return Err(EmailError::HeaderInjection { header: "Subject" });
        }

        let to = self
            .to
            .iter()
            .map(Address::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = String::with_capacity(body.len() + 256);
        // Writing into a String cannot fail
        let _ = write!(out, "From: {}\r\n", self.from);
        let _ = write!(out, "To: {}\r\n", to);
        let _ = write!(out, "Subject: {}\r\n", self.subject);
        let _ = write!(out, "Date: {}\r\n", date.to_rfc2822());
        let _ = write!(out, "Message-ID: {}\r\n", self.message_id(date));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        out.push_str("\r\n");
        // Bare CR and bare LF both end a line
        let body = body.replace("\r\n", "\n").replace('\r', "\n");
        for line in body.lines() {
            out.push_str(line);
            out.push_str("\r\n");
        }

        Ok(out)
    }

    fn message_id(&self, date: DateTime<Utc>) -> String {
        let host = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| {
                !h.is_empty()
                    && h.chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            })
            .unwrap_or_else(|| self.from.domain().to_string());

        format!(
            "<{}.{}@{}>",
            date.timestamp_nanos_opt().unwrap_or_default(),
            std::process::id(),
            host
        )
    }
}

/// A [`MessageSender`] that writes rendered emails to a sink
pub struct EmailSender<W> {
    config: EmailConfig,
    sink: Mutex<W>,
}

impl<W: Write + Send> EmailSender<W> {
    /// Create a sender writing to `sink`
    pub fn new(config: EmailConfig, sink: W) -> Self {
        Self {
            config,
            sink: Mutex::new(sink),
        }
    }

    /// The envelope settings used for every message
    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Send `message` through the gate, refusing empty messages
    pub fn send(&self, message: &str) -> Result<(), GateError> {
        send_message_if_not_blank(self, message)
    }

    /// Consume the sender and return the sink
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> MessageSender for EmailSender<W> {
    fn send_message(&self, message: &str) -> Result<(), SendError> {
        let rendered = self.config.render(message, Utc::now())?;

        let mut sink = self
            .sink
            .lock()
            .map_err(|_| "email sink lock poisoned")?;
        sink.write_all(rendered.as_bytes())?;
        sink.flush()?;

        tracing::debug!(
            from = %self.config.from,
            recipients = self.config.to.len(),
            bytes = rendered.len(),
            "Email written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io;

    fn config() -> EmailConfig {
        EmailConfig::new(
            "foo@example.com".parse().unwrap(),
            vec![
                "bar@example.com".parse().unwrap(),
                "baz@example.com".parse().unwrap(),
            ],
            "[EXTERNAL] - SUPER important",
        )
        .unwrap()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_no_recipients() {
        let result = EmailConfig::new("foo@example.com".parse().unwrap(), vec![], "hi");
        assert_eq!(result, Err(EmailError::NoRecipients));
    }

    #[test]
    fn test_render_headers() {
        let date = Utc.with_ymd_and_hms(2025, 7, 15, 10, 52, 37).unwrap();
        let rendered = config().render("line one\nline two", date).unwrap();

        assert!(rendered.starts_with("From: foo@example.com\r\n"));
        assert!(rendered.contains("To: bar@example.com, baz@example.com\r\n"));
        assert!(rendered.contains("Subject: [EXTERNAL] - SUPER important\r\n"));
        assert!(rendered.contains("Date: Tue, 15 Jul 2025 10:52:37 +0000\r\n"));
        assert!(rendered.contains("Message-ID: <"));
        assert!(rendered.ends_with("\r\n\r\nline one\r\nline two\r\n"));
    }

    #[test]
    fn test_render_normalizes_line_endings() {
        let rendered = config().render("a\rb\r\nc\nd", Utc::now()).unwrap();

        assert!(rendered.ends_with("\r\n\r\na\r\nb\r\nc\r\nd\r\n"));
        let bytes = rendered.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            match b {
                b'\r' => assert_eq!(bytes.get(i + 1), Some(&b'\n'), "lone CR at {i}"),
                b'\n' => assert_eq!(bytes[i - 1], b'\r', "lone LF at {i}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_render_rejects_subject_injection() {
        let mut cfg = config();
        cfg.subject = "hi\r\nBcc: evil@example.com".to_string();

        let result = cfg.render("body", Utc::now());
        assert_eq!(
            result,
            Err(EmailError::HeaderInjection { header: "Subject" })
        );
    }

    #[test]
    fn test_sender_writes_to_sink() {
        let sender = EmailSender::new(config(), Vec::new());
        sender.send_message("This is a test").unwrap();

        let written = String::from_utf8(sender.into_inner()).unwrap();
        assert!(written.contains("To: bar@example.com, baz@example.com\r\n"));
        assert!(written.ends_with("\r\n\r\nThis is a test\r\n"));
    }

    #[test]
    fn test_send_refuses_empty_message() {
        let sender = EmailSender::new(config(), Vec::new());
        let result = sender.send("");

        assert!(matches!(result, Err(GateError::EmptyMessage)));
        assert!(sender.into_inner().is_empty());
    }

    #[test]
    fn test_write_failure_is_delivery_error() {
        let sender = EmailSender::new(config(), BrokenPipe);
        let err = sender.send("hello").unwrap_err();

        let inner = err.into_delivery_error().expect("delivery error");
        let io_err = inner.downcast_ref::<io::Error>().expect("io error");
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }
}
