//! # Bulk Email Dispatch Library
//!
//! A bulk email dispatch facility:
//! - Strict batch validation (addresses, required fields, attachments)
//!   that fails fast before anything is transmitted
//! - Bounded-parallelism fan-out with a hard concurrency cap
//! - Per-message outcomes: one message's failure never aborts the batch
//! - Pluggable transport and log-sink collaborators
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bulkmail::{Dispatcher, Message, TransportOptions, TracingLogSink};
//! # use bulkmail::mocks::MockTransport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = TransportOptions::builder()
//!         .host("smtp.example.com")
//!         .port(587)
//!         .credentials("user@example.com", "password")
//!         .max_concurrency(4)
//!         .build()?;
//!
//!     let dispatcher = Dispatcher::builder()
//!         .options(options)
//!         .transport(Arc::new(MockTransport::new())) // your MailTransport impl
//!         .logger(Arc::new(TracingLogSink::new()))
//!         .build()?;
//!
//!     let message = Message::builder()
//!         .from("sender@example.com")
//!         .to("recipient@example.com")
//!         .subject("Hello from Rust!")
//!         .body("This is a test email.")
//!         .build();
//!
//!     let report = dispatcher.send(vec![message]).await?;
//!     println!("{} sent, {} failed", report.succeeded(), report.failed());
//!
//!     Ok(())
//! }
//! ```
//!
//! A batch being accepted and every message being delivered are distinct
//! guarantees: a non-erroring `send` can still contain failed outcomes.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Validation gate
pub mod validate;

// Collaborator boundaries
pub mod logging;
pub mod transport;

// Dispatch loop and results
pub mod dispatch;
pub mod report;

// Observability
pub mod observability;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use config::{TransportOptions, TransportOptionsBuilder};
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use errors::{DispatchError, DispatchErrorKind, DispatchResult, ErrorSeverity};
pub use logging::{LogSink, Severity, TracingLogSink};
pub use report::DispatchReport;
pub use transport::{ComposedMail, MailTransport};
pub use types::{Attachment, Contact, Message, MessageBuilder, SendOutcome};
