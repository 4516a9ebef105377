//! Core value types for bulk dispatch.
//!
//! This module provides:
//! - Contact (address + optional display name)
//! - Attachment (binary payload + filename + MIME type)
//! - Message (the unit of a batch) with a builder
//! - SendOutcome (per-message delivery result)
//!
//! All values are caller-constructed and immutable once built. Construction
//! performs no format checks; the validator in [`crate::validate`] is the
//! single gate before transmission, so a structurally bad value is
//! representable but never sent.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Email participant: address plus optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Email address (e.g., "john@example.com").
    pub email: String,
    /// Display name (e.g., "John Doe").
    pub name: Option<String>,
}

impl Contact {
    /// Creates a contact with just an email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Creates a contact with display name and email address.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name if present.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Formats the contact for message headers.
    pub fn to_header(&self) -> String {
        match &self.name {
            Some(name) => {
                // Quote name if it contains special characters
                if name.contains(|c: char| !c.is_alphanumeric() && c != ' ') {
                    format!("\"{}\" <{}>", name, self.email)
                } else {
                    format!("{} <{}>", name, self.email)
                }
            }
            None => self.email.clone(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_header())
    }
}

impl From<&str> for Contact {
    fn from(email: &str) -> Self {
        Contact::new(email)
    }
}

impl From<String> for Contact {
    fn from(email: String) -> Self {
        Contact::new(email)
    }
}

/// File attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Filename presented to the recipient.
    pub file_name: String,
    /// MIME content type.
    pub mime_type: String,
    /// Binary content.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates a new attachment.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Creates an attachment with the MIME type detected from the filename.
    pub fn from_file(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self::new(file_name, mime_type, data)
    }

    /// Returns the payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A fully-specified email message, the unit of a batch.
///
/// Equality is value equality over every field; dispatch reports use it to
/// correlate outcomes back to input messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Sender.
    pub from: Contact,
    /// Optional reply-to.
    pub reply_to: Option<Contact>,
    /// Primary recipients.
    pub to: Vec<Contact>,
    /// CC recipients.
    pub cc: Vec<Contact>,
    /// BCC recipients.
    pub bcc: Vec<Contact>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// File attachments.
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Returns all recipients (to + cc + bcc).
    pub fn all_recipients(&self) -> impl Iterator<Item = &Contact> {
        self.to.iter().chain(self.cc.iter()).chain(self.bcc.iter())
    }

    /// Returns the count of all recipients.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// Returns true if the message has any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Builder for [`Message`].
///
/// Construction is infallible; run the batch through the dispatcher (or
/// [`crate::validate::validate_message`] directly) to check it.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    from: Option<Contact>,
    reply_to: Option<Contact>,
    to: Vec<Contact>,
    cc: Vec<Contact>,
    bcc: Vec<Contact>,
    subject: String,
    body: String,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    /// Sets the sender.
    pub fn from(mut self, contact: impl Into<Contact>) -> Self {
        self.from = Some(contact.into());
        self
    }

    /// Sets the reply-to contact.
    pub fn reply_to(mut self, contact: impl Into<Contact>) -> Self {
        self.reply_to = Some(contact.into());
        self
    }

    /// Adds a primary recipient.
    pub fn to(mut self, contact: impl Into<Contact>) -> Self {
        self.to.push(contact.into());
        self
    }

    /// Adds multiple primary recipients.
    pub fn to_many<I, C>(mut self, contacts: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Contact>,
    {
        self.to.extend(contacts.into_iter().map(Into::into));
        self
    }

    /// Adds a CC recipient.
    pub fn cc(mut self, contact: impl Into<Contact>) -> Self {
        self.cc.push(contact.into());
        self
    }

    /// Adds a BCC recipient.
    pub fn bcc(mut self, contact: impl Into<Contact>) -> Self {
        self.bcc.push(contact.into());
        self
    }

    /// Sets the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Builds the message.
    pub fn build(self) -> Message {
        Message {
            from: self.from.unwrap_or_else(|| Contact::new("")),
            reply_to: self.reply_to,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            body: self.body,
            attachments: self.attachments,
        }
    }
}

/// Per-message delivery outcome.
///
/// Produced exactly once per input message per dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SendOutcome {
    /// The transport accepted the message.
    Ok,
    /// The send failed; full detail went to the log sink.
    InternalError,
}

impl SendOutcome {
    /// Returns true if the message was delivered to the transport.
    pub fn is_ok(&self) -> bool {
        matches!(self, SendOutcome::Ok)
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Ok => write!(f, "OK"),
            SendOutcome::InternalError => write!(f, "InternalError"),
        }
    }
}
