//! Batch dispatch orchestration.
//!
//! [`Dispatcher`] is the sole entry point: it validates a batch fail-fast,
//! fans the messages out across tokio tasks bounded by the configured
//! concurrency cap, and aggregates one [`SendOutcome`] per input message.
//! A message's failure is absorbed into its own outcome and reported
//! through the log sink; it never cancels or delays a sibling.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::TransportOptions;
use crate::errors::{DispatchError, DispatchResult};
use crate::logging::{LogSink, Severity};
use crate::observability::DispatchMetrics;
use crate::report::DispatchReport;
use crate::transport::{compose, MailTransport};
use crate::types::{Message, SendOutcome};
use crate::validate;

/// Bulk email dispatcher.
///
/// Construction validates the transport options eagerly and requires both
/// collaborators; a `Dispatcher` that exists is ready to send.
#[derive(Debug)]
pub struct Dispatcher {
    /// Validated connection options, shared read-only by all workers.
    options: Arc<TransportOptions>,
    /// Transport collaborator.
    transport: Arc<dyn MailTransport>,
    /// Failure diagnostics sink.
    logger: Arc<dyn LogSink>,
    /// Metrics collector.
    metrics: Arc<DispatchMetrics>,
}

impl Dispatcher {
    /// Creates a dispatcher from validated options and its collaborators.
    pub fn new(
        options: TransportOptions,
        transport: Arc<dyn MailTransport>,
        logger: Arc<dyn LogSink>,
    ) -> DispatchResult<Self> {
        options.validate()?;

        Ok(Self {
            options: Arc::new(options),
            transport,
            logger,
            metrics: Arc::new(DispatchMetrics::new()),
        })
    }

    /// Creates a builder for the dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Returns the options the dispatcher was built with.
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Returns a reference to the metrics collector.
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Sends a batch, returning one outcome per input message.
    ///
    /// The whole call fails only when the batch fails validation; in that
    /// case nothing is sent. Once dispatch starts it always completes: a
    /// per-message transport failure or worker panic becomes
    /// [`SendOutcome::InternalError`] for that message (with one log-sink
    /// entry carrying the error) and the rest of the batch proceeds.
    ///
    /// The returned report has no ordering guarantee relative to the
    /// input; correlate with [`DispatchReport::outcome_for`].
    pub async fn send(&self, messages: Vec<Message>) -> DispatchResult<DispatchReport> {
        if let Err(err) = validate::validate_batch(&messages) {
            self.metrics.record_batch(false);
            return Err(err);
        }
        self.metrics.record_batch(true);

        // Hard cap on in-flight transport calls.
        let gate = Arc::new(Semaphore::new(self.options.max_concurrency));

        let mut handles = Vec::with_capacity(messages.len());
        for message in &messages {
            let message = message.clone();
            let gate = Arc::clone(&gate);
            let transport = Arc::clone(&self.transport);
            let options = Arc::clone(&self.options);

            handles.push(tokio::spawn(async move {
                let mail = compose(&message);

                // Permit held across the transport call only.
                let _permit = gate.acquire_owned().await.map_err(|e| {
                    DispatchError::internal("concurrency gate closed").with_cause(e)
                })?;
                transport.send(&options, &mail).await
            }));
        }

        // Joining in the driver keeps message identity even when a worker
        // panics, and exposes no partial snapshot.
        let results = futures::future::join_all(handles).await;

        let mut entries = Vec::with_capacity(results.len());
        for (message, joined) in messages.into_iter().zip(results) {
            let outcome = match joined {
                Ok(Ok(())) => {
                    self.metrics.record_send_success();
                    SendOutcome::Ok
                }
                Ok(Err(err)) => self.record_failure(err),
                Err(join_err) => self.record_failure(
                    DispatchError::internal("send worker panicked").with_cause(join_err),
                ),
            };
            entries.push((message, outcome));
        }

        Ok(DispatchReport::from_entries(entries))
    }

    fn record_failure(&self, err: DispatchError) -> SendOutcome {
        self.metrics.record_send_failure();
        self.logger
            .log(Severity::Error, "An unexpected error occurred.", &err);
        SendOutcome::InternalError
    }
}

/// Builder for [`Dispatcher`].
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    options: Option<TransportOptions>,
    transport: Option<Arc<dyn MailTransport>>,
    logger: Option<Arc<dyn LogSink>>,
}

impl DispatcherBuilder {
    /// Sets the transport options.
    pub fn options(mut self, options: TransportOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the transport collaborator.
    pub fn transport(mut self, transport: Arc<dyn MailTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the log sink.
    pub fn logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the dispatcher, failing if a capability is missing.
    pub fn build(self) -> DispatchResult<Dispatcher> {
        let options = self
            .options
            .ok_or_else(|| DispatchError::configuration("transport options are required"))?;
        let transport = self
            .transport
            .ok_or_else(|| DispatchError::configuration("a transport is required"))?;
        let logger = self
            .logger
            .ok_or_else(|| DispatchError::configuration("a log sink is required"))?;

        Dispatcher::new(options, transport, logger)
    }
}
