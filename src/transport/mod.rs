//! Transport boundary.
//!
//! The crate never opens a socket itself. It composes a validated
//! [`Message`] into the transport primitives a mail relay needs
//! ([`ComposedMail`]) and hands it to a [`MailTransport`] implementation
//! supplied by the environment. Anything that can go wrong past that
//! boundary surfaces as a [`crate::errors::DispatchErrorKind::Transport`]
//! error.
//!
//! Implementations may open a fresh connection per send or pool
//! connections internally; neither changes observable behavior.

use async_trait::async_trait;
use std::fmt;

use crate::config::TransportOptions;
use crate::errors::DispatchResult;
use crate::types::Message;

/// A message flattened into transport primitives.
///
/// Addresses carry the display name in header form (`Name <email>`);
/// recipient lists are kept separate so the transport can build both the
/// envelope and the visible headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMail {
    /// Envelope sender, header form.
    pub from: String,
    /// Reply-to, header form.
    pub reply_to: Option<String>,
    /// Primary recipients, header form.
    pub to: Vec<String>,
    /// CC recipients, header form.
    pub cc: Vec<String>,
    /// BCC recipients, header form.
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Attachment payloads.
    pub attachments: Vec<AttachmentPayload>,
}

impl ComposedMail {
    /// Returns every recipient address slated for delivery.
    pub fn all_recipients(&self) -> impl Iterator<Item = &str> {
        self.to
            .iter()
            .chain(self.cc.iter())
            .chain(self.bcc.iter())
            .map(String::as_str)
    }
}

/// Attachment in wire-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    /// Filename presented to the recipient.
    pub file_name: String,
    /// MIME content type.
    pub mime_type: String,
    /// Binary content.
    pub data: Vec<u8>,
}

/// Maps a validated message into transport primitives.
pub fn compose(message: &Message) -> ComposedMail {
    ComposedMail {
        from: message.from.to_header(),
        reply_to: message.reply_to.as_ref().map(|c| c.to_header()),
        to: message.to.iter().map(|c| c.to_header()).collect(),
        cc: message.cc.iter().map(|c| c.to_header()).collect(),
        bcc: message.bcc.iter().map(|c| c.to_header()).collect(),
        subject: message.subject.clone(),
        body: message.body.clone(),
        attachments: message
            .attachments
            .iter()
            .map(|a| AttachmentPayload {
                file_name: a.file_name.clone(),
                mime_type: a.mime_type.clone(),
                data: a.data.clone(),
            })
            .collect(),
    }
}

/// The external component that performs the actual network send.
///
/// Required capability: the dispatcher cannot be constructed without one.
/// Calls may run concurrently from multiple workers, so implementations
/// must be `Send + Sync`.
#[async_trait]
pub trait MailTransport: Send + Sync + fmt::Debug {
    /// Sends one composed message over the relay described by `options`.
    async fn send(&self, options: &TransportOptions, mail: &ComposedMail) -> DispatchResult<()>;
}
