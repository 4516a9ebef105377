//! Batch validation.
//!
//! Pure, fail-fast checks that gate a batch before any transmission is
//! attempted: the first violation aborts the whole call with a tagged
//! reason ([`crate::errors::DispatchErrorKind`]), and no partial results
//! are produced.
//!
//! The address grammar is the usual local-part@domain form, matched
//! case-insensitively. Matching is linear-time by construction (the `regex`
//! crate does not backtrack), so no match timeout is needed to bound
//! pathological inputs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DispatchError, DispatchResult};
use crate::types::{Attachment, Contact, Message};

/// Maximum total address length.
const MAX_ADDRESS_LEN: usize = 254;

/// Maximum local-part length.
const MAX_LOCAL_LEN: usize = 64;

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    // Dot-atom local part: dot-separated runs of atom characters, so
    // leading, trailing, and consecutive dots are unrepresentable.
    Regex::new(
        r"(?i)^[0-9a-z!#$%&'*+/=?^_`{|}~-]+(?:\.[0-9a-z!#$%&'*+/=?^_`{|}~-]+)*@[0-9a-z][0-9a-z-]*(?:\.[0-9a-z][0-9a-z-]*)+$",
    )
    .expect("address pattern is valid")
});

/// Returns true if `address` satisfies the email-address grammar.
pub fn is_valid_address(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LEN {
        return false;
    }
    match address.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_LEN => {}
        _ => return false,
    }
    ADDRESS_RE.is_match(address)
}

/// Validates a whole batch, failing fast on the first violation.
pub fn validate_batch(messages: &[Message]) -> DispatchResult<()> {
    if messages.is_empty() {
        return Err(DispatchError::invalid_batch("batch cannot be empty"));
    }

    for message in messages {
        validate_message(message)?;
    }

    Ok(())
}

/// Validates a single message and everything nested in it.
pub fn validate_message(message: &Message) -> DispatchResult<()> {
    validate_contact(&message.from)?;

    if message.subject.trim().is_empty() {
        return Err(DispatchError::invalid_message("subject cannot be blank"));
    }

    if message.body.trim().is_empty() {
        return Err(DispatchError::invalid_message("body cannot be blank"));
    }

    if message.to.is_empty() {
        return Err(DispatchError::invalid_message(
            "at least one `to` recipient is required",
        ));
    }

    for to in &message.to {
        validate_contact(to)?;
    }

    if let Some(reply_to) = &message.reply_to {
        validate_contact(reply_to)?;
    }

    for cc in &message.cc {
        validate_contact(cc)?;
    }

    for bcc in &message.bcc {
        validate_contact(bcc)?;
    }

    for attachment in &message.attachments {
        validate_attachment(attachment)?;
    }

    Ok(())
}

/// Validates a contact's address. The display name is never validated.
pub fn validate_contact(contact: &Contact) -> DispatchResult<()> {
    if !is_valid_address(&contact.email) {
        return Err(DispatchError::invalid_contact(format!(
            "{:?} is not a valid email address",
            contact.email
        )));
    }
    Ok(())
}

/// Validates an attachment's required fields.
pub fn validate_attachment(attachment: &Attachment) -> DispatchResult<()> {
    if attachment.file_name.trim().is_empty() {
        return Err(DispatchError::invalid_attachment(
            "file_name cannot be blank",
        ));
    }

    if attachment.mime_type.trim().is_empty() {
        return Err(DispatchError::invalid_attachment(
            "mime_type cannot be blank",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DispatchErrorKind;
    use rstest::rstest;

    fn valid_message() -> Message {
        Message::builder()
            .from("sender@example.com")
            .to("recipient@example.com")
            .subject("hi")
            .body("hi")
            .build()
    }

    #[rstest]
    #[case("a@x.com")]
    #[case("john.doe@example.com")]
    #[case("user+tag@sub.example.co.uk")]
    #[case("MIXED.Case@Example.COM")]
    #[case("o'brien@example.com")]
    fn accepts_valid_addresses(#[case] address: &str) {
        assert!(is_valid_address(address), "{address} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@@example.com")]
    #[case("user@localhost")]
    #[case("user name@example.com")]
    #[case(".leading@example.com")]
    #[case("double..dot@example.com")]
    fn rejects_invalid_addresses(#[case] address: &str) {
        assert!(!is_valid_address(address), "{address} should be invalid");
    }

    #[test]
    fn rejects_overlong_addresses() {
        let local = "a".repeat(65);
        assert!(!is_valid_address(&format!("{local}@example.com")));

        let domain = "a".repeat(250);
        assert!(!is_valid_address(&format!("user@{domain}.com")));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = validate_batch(&[]).unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::InvalidBatch);
    }

    #[test]
    fn test_valid_batch_accepted() {
        assert!(validate_batch(&[valid_message(), valid_message()]).is_ok());
    }

    #[test]
    fn test_fail_fast_on_first_bad_message() {
        let mut bad = valid_message();
        bad.subject = "   ".to_string();

        let err = validate_batch(&[bad, valid_message()]).unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::InvalidMessage);
        assert!(err.message().contains("subject"));
    }

    #[test]
    fn test_invalid_from_address() {
        let mut message = valid_message();
        message.from = Contact::new("not-an-email");

        let err = validate_message(&message).unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::InvalidContact);
    }

    #[test]
    fn test_missing_to_recipients() {
        let mut message = valid_message();
        message.to.clear();

        let err = validate_message(&message).unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::InvalidMessage);
        assert!(err.message().contains("to"));
    }

    #[test]
    fn test_optional_contacts_validated_when_present() {
        let mut message = valid_message();
        message.reply_to = Some(Contact::new("bad"));
        assert_eq!(
            validate_message(&message).unwrap_err().kind(),
            DispatchErrorKind::InvalidContact
        );

        let mut message = valid_message();
        message.cc.push(Contact::new("bad"));
        assert!(validate_message(&message).is_err());

        let mut message = valid_message();
        message.bcc.push(Contact::new("bad"));
        assert!(validate_message(&message).is_err());
    }

    #[test]
    fn test_display_name_never_validated() {
        let mut message = valid_message();
        message.from = Contact::with_name("Not @ Valid \u{0000} Name", "sender@example.com");
        assert!(validate_message(&message).is_ok());
    }

    #[test]
    fn test_attachment_required_fields() {
        let mut message = valid_message();
        message.attachments.push(Attachment::new("", "text/plain", vec![1]));
        assert_eq!(
            validate_message(&message).unwrap_err().kind(),
            DispatchErrorKind::InvalidAttachment
        );

        let mut message = valid_message();
        message.attachments.push(Attachment::new("a.txt", "  ", vec![1]));
        assert_eq!(
            validate_message(&message).unwrap_err().kind(),
            DispatchErrorKind::InvalidAttachment
        );

        let mut message = valid_message();
        message
            .attachments
            .push(Attachment::new("a.txt", "text/plain", vec![1]));
        assert!(validate_message(&message).is_ok());
    }

    #[test]
    fn test_validation_idempotent() {
        let mut bad = valid_message();
        bad.from = Contact::new("not-an-email");
        let batch = vec![valid_message(), bad];

        let first = validate_batch(&batch).unwrap_err();
        let second = validate_batch(&batch).unwrap_err();
        assert_eq!(first.kind(), second.kind());
        assert_eq!(first.message(), second.message());
    }
}
