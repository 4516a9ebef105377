//! Error types for bulk email dispatch.
//!
//! Provides a single error type with a kind enum covering configuration,
//! validation, and transport failures, plus severity classification.

use std::fmt;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatch error kinds categorizing different failure modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchErrorKind {
    // Configuration errors
    /// Transport options are invalid.
    ConfigurationInvalid,

    // Validation errors
    /// The batch itself is unusable (empty).
    InvalidBatch,
    /// A message failed structural validation.
    InvalidMessage,
    /// A contact's email address failed the address grammar.
    InvalidContact,
    /// An attachment is missing required fields.
    InvalidAttachment,

    // Per-message errors
    /// The transport collaborator failed to deliver a message.
    Transport,
    /// Unexpected runtime failure while sending a message.
    Internal,
}

impl DispatchErrorKind {
    /// Returns true if this kind aborts the whole `send` call.
    ///
    /// Transport and internal failures are absorbed into per-message
    /// outcomes and never surface as call-level errors.
    pub fn is_call_fatal(&self) -> bool {
        matches!(
            self,
            DispatchErrorKind::ConfigurationInvalid
                | DispatchErrorKind::InvalidBatch
                | DispatchErrorKind::InvalidMessage
                | DispatchErrorKind::InvalidContact
                | DispatchErrorKind::InvalidAttachment
        )
    }

    /// Returns the severity level of this error kind.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DispatchErrorKind::ConfigurationInvalid => ErrorSeverity::Critical,

            DispatchErrorKind::InvalidBatch
            | DispatchErrorKind::InvalidMessage
            | DispatchErrorKind::InvalidContact
            | DispatchErrorKind::InvalidAttachment
            | DispatchErrorKind::Internal => ErrorSeverity::Error,

            DispatchErrorKind::Transport => ErrorSeverity::Warning,
        }
    }
}

impl fmt::Display for DispatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchErrorKind::ConfigurationInvalid => write!(f, "Invalid configuration"),
            DispatchErrorKind::InvalidBatch => write!(f, "Invalid batch"),
            DispatchErrorKind::InvalidMessage => write!(f, "Invalid message"),
            DispatchErrorKind::InvalidContact => write!(f, "Invalid contact"),
            DispatchErrorKind::InvalidAttachment => write!(f, "Invalid attachment"),
            DispatchErrorKind::Transport => write!(f, "Transport failure"),
            DispatchErrorKind::Internal => write!(f, "Internal error"),
        }
    }
}

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational - expected scenario.
    Info,
    /// Warning - temporary issue, may recover.
    Warning,
    /// Error - operation failed.
    Error,
    /// Critical - requires immediate attention.
    Critical,
}

/// Dispatch error with detailed information.
#[derive(Error, Debug)]
pub struct DispatchError {
    /// Error kind.
    kind: DispatchErrorKind,
    /// Human-readable message.
    message: String,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DispatchError {
    /// Creates a new dispatch error.
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Sets the underlying cause.
    pub fn with_cause<E: std::error::Error + Send + Sync + 'static>(mut self, cause: E) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> DispatchErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error aborts the whole `send` call.
    pub fn is_call_fatal(&self) -> bool {
        self.kind.is_call_fatal()
    }

    /// Returns the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        self.kind.severity()
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::ConfigurationInvalid, message)
    }

    /// Creates a batch-level validation error.
    pub fn invalid_batch(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::InvalidBatch, message)
    }

    /// Creates a message-level validation error.
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::InvalidMessage, message)
    }

    /// Creates a contact validation error.
    pub fn invalid_contact(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::InvalidContact, message)
    }

    /// Creates an attachment validation error.
    pub fn invalid_attachment(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::InvalidAttachment, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::Transport, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::Internal, message)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_fatal_classification() {
        assert!(DispatchErrorKind::InvalidBatch.is_call_fatal());
        assert!(DispatchErrorKind::InvalidContact.is_call_fatal());
        assert!(DispatchErrorKind::ConfigurationInvalid.is_call_fatal());
        assert!(!DispatchErrorKind::Transport.is_call_fatal());
        assert!(!DispatchErrorKind::Internal.is_call_fatal());
    }

    #[test]
    fn test_error_severity() {
        assert_eq!(
            DispatchErrorKind::ConfigurationInvalid.severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            DispatchErrorKind::InvalidContact.severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            DispatchErrorKind::Transport.severity(),
            ErrorSeverity::Warning
        );
    }

    #[test]
    fn test_error_display_includes_kind() {
        let err = DispatchError::invalid_contact("not-an-email is not a valid email address");
        let rendered = err.to_string();
        assert!(rendered.contains("Invalid contact"));
        assert!(rendered.contains("not-an-email"));
    }

    #[test]
    fn test_error_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DispatchError::transport("relay unreachable").with_cause(io);
        assert_eq!(err.kind(), DispatchErrorKind::Transport);
        assert!(std::error::Error::source(&err).is_some());
    }
}
