//! Mock implementations for testing.
//!
//! Provides a recording transport with programmable failures and a
//! concurrency gauge, a recording log sink, and batch fixtures.

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::TransportOptions;
use crate::errors::{DispatchError, DispatchResult};
use crate::logging::{LogSink, Severity};
use crate::transport::{ComposedMail, MailTransport};
use crate::types::{Attachment, Message};

/// Mock mail transport for testing.
///
/// Records every send attempt, can be programmed to fail for specific
/// subjects or on the next call, and tracks how many sends were in flight
/// at once so tests can assert the concurrency cap.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Recorded send attempts.
    calls: Mutex<Vec<ComposedMail>>,
    /// Subjects whose sends fail with a transport error.
    fail_subjects: Mutex<HashSet<String>>,
    /// One-shot programmed failure.
    fail_next: Mutex<Option<DispatchError>>,
    /// Simulated per-send latency.
    latency: Mutex<Duration>,
    /// Sends currently in flight.
    in_flight: AtomicUsize,
    /// Highest observed in-flight count.
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock transport that sleeps `latency` inside each send.
    pub fn with_latency(latency: Duration) -> Self {
        let transport = Self::default();
        *transport.latency.lock().unwrap() = latency;
        transport
    }

    /// Fails every send whose subject equals `subject`.
    pub fn fail_for_subject(&self, subject: impl Into<String>) -> &Self {
        self.fail_subjects.lock().unwrap().insert(subject.into());
        self
    }

    /// Fails the next send with `error`.
    pub fn fail_next_with(&self, error: DispatchError) -> &Self {
        *self.fail_next.lock().unwrap() = Some(error);
        self
    }

    /// Returns all recorded send attempts.
    pub fn sent(&self) -> Vec<ComposedMail> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the highest number of sends observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Clears recorded calls and programmed failures.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.fail_subjects.lock().unwrap().clear();
        *self.fail_next.lock().unwrap() = None;
        self.in_flight.store(0, Ordering::SeqCst);
        self.peak_in_flight.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, _options: &TransportOptions, mail: &ComposedMail) -> DispatchResult<()> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        self.calls.lock().unwrap().push(mail.clone());

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let result = if let Some(error) = self.fail_next.lock().unwrap().take() {
            Err(error)
        } else if self.fail_subjects.lock().unwrap().contains(&mail.subject) {
            Err(DispatchError::transport(format!(
                "relay rejected message {:?}",
                mail.subject
            )))
        } else {
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// One recorded log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Entry severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Rendered error detail.
    pub error: String,
}

/// Mock log sink that records every entry.
#[derive(Debug, Default, Clone)]
pub struct MockLogSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MockLogSink {
    /// Creates a new recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl LogSink for MockLogSink {
    fn log(&self, severity: Severity, message: &str, error: &DispatchError) {
        self.entries.lock().unwrap().push(LogEntry {
            severity,
            message: message.to_string(),
            error: error.to_string(),
        });
    }
}

/// Creates valid transport options with the given concurrency cap.
pub fn test_options(max_concurrency: usize) -> TransportOptions {
    TransportOptions {
        host: "smtp.example.com".to_string(),
        port: 587,
        username: "user".to_string(),
        password: Some(SecretString::new("pass".to_string())),
        use_tls: true,
        max_concurrency,
    }
}

/// Creates a valid test message with the given subject.
pub fn test_message(subject: impl Into<String>) -> Message {
    Message::builder()
        .from("sender@example.com")
        .to("recipient@example.com")
        .subject(subject)
        .body("Test body")
        .build()
}

/// Creates a valid test message carrying an attachment.
pub fn test_message_with_attachment() -> Message {
    Message::builder()
        .from("sender@example.com")
        .to("recipient@example.com")
        .subject("Test with Attachment")
        .body("See attached")
        .attachment(Attachment::new(
            "test.txt",
            "text/plain",
            b"Hello, World!".to_vec(),
        ))
        .build()
}
