//! Dispatch a small batch and inspect per-message outcomes.
//!
//! Uses the in-crate mock transport so it runs without a relay; swap in
//! your own `MailTransport` implementation for real delivery.

use std::sync::Arc;

use bulkmail::mocks::MockTransport;
use bulkmail::{Attachment, Contact, Dispatcher, Message, TracingLogSink, TransportOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = TransportOptions::builder()
        .host("smtp.example.com")
        .port(587)
        .credentials("user@example.com", "password")
        .max_concurrency(3)
        .build()?;

    let transport = Arc::new(MockTransport::new());
    transport.fail_for_subject("Monthly invoice #2");

    let dispatcher = Dispatcher::builder()
        .options(options)
        .transport(transport)
        .logger(Arc::new(TracingLogSink::new()))
        .build()?;

    let batch: Vec<Message> = (1..=5)
        .map(|i| {
            Message::builder()
                .from(Contact::with_name("Billing", "billing@example.com"))
                .to(format!("customer-{i}@example.com"))
                .reply_to("support@example.com")
                .subject(format!("Monthly invoice #{i}"))
                .body("Your invoice is attached.")
                .attachment(Attachment::from_file("invoice.pdf", vec![0u8; 64]))
                .build()
        })
        .collect();

    let report = dispatcher.send(batch).await?;

    for (message, outcome) in &report {
        println!("{} -> {}", message.subject, outcome);
    }
    println!("{} sent, {} failed", report.succeeded(), report.failed());

    Ok(())
}
