//! Outcome aggregation.
//!
//! A [`DispatchReport`] is the immutable snapshot a dispatch call returns:
//! one `(Message, SendOutcome)` pair per input message, in no particular
//! order. Consumers correlate by message value equality, not by position.

use crate::types::{Message, SendOutcome};

/// Per-batch result set, one entry per input message.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    entries: Vec<(Message, SendOutcome)>,
}

impl DispatchReport {
    /// Builds a report from collected pairs.
    pub fn from_entries(entries: Vec<(Message, SendOutcome)>) -> Self {
        Self { entries }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the report is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the outcome recorded for `message`, matched by value.
    pub fn outcome_for(&self, message: &Message) -> Option<SendOutcome> {
        self.entries
            .iter()
            .find(|(m, _)| m == message)
            .map(|(_, outcome)| *outcome)
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &(Message, SendOutcome)> {
        self.entries.iter()
    }

    /// Iterates over messages that were delivered to the transport.
    pub fn successes(&self) -> impl Iterator<Item = &Message> {
        self.entries
            .iter()
            .filter(|(_, o)| o.is_ok())
            .map(|(m, _)| m)
    }

    /// Iterates over messages that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Message> {
        self.entries
            .iter()
            .filter(|(_, o)| !o.is_ok())
            .map(|(m, _)| m)
    }

    /// Returns the count of delivered messages.
    pub fn succeeded(&self) -> usize {
        self.successes().count()
    }

    /// Returns the count of failed messages.
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if every message was delivered.
    ///
    /// A returned report means the batch was accepted; it does not mean
    /// every message went out. Check this (or [`failures`](Self::failures))
    /// before declaring the batch delivered.
    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|(_, o)| o.is_ok())
    }
}

impl IntoIterator for DispatchReport {
    type Item = (Message, SendOutcome);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DispatchReport {
    type Item = &'a (Message, SendOutcome);
    type IntoIter = std::slice::Iter<'a, (Message, SendOutcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(subject: &str) -> Message {
        Message::builder()
            .from("sender@example.com")
            .to("recipient@example.com")
            .subject(subject)
            .body("body")
            .build()
    }

    #[test]
    fn test_outcome_correlation_by_value() {
        let a = message("a");
        let b = message("b");
        let report = DispatchReport::from_entries(vec![
            (a.clone(), SendOutcome::Ok),
            (b.clone(), SendOutcome::InternalError),
        ]);

        assert_eq!(report.outcome_for(&a), Some(SendOutcome::Ok));
        assert_eq!(report.outcome_for(&b), Some(SendOutcome::InternalError));
        assert_eq!(report.outcome_for(&message("missing")), None);

        // A structurally equal message correlates even if it is a
        // different instance.
        assert_eq!(report.outcome_for(&message("a")), Some(SendOutcome::Ok));
    }

    #[test]
    fn test_counts_and_iterators() {
        let report = DispatchReport::from_entries(vec![
            (message("a"), SendOutcome::Ok),
            (message("b"), SendOutcome::InternalError),
            (message("c"), SendOutcome::Ok),
        ]);

        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_ok());
        assert_eq!(report.failures().next().unwrap().subject, "b");
    }
}
