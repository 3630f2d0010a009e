// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outgoing mail.
//!
//! Handlers queue messages on a `Mailer`; a single background task drains
//! the queue in order and hands each message to a `MailTransport`.

use bungalow_bliss_api::MailMessage;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail queue is closed")]
    QueueClosed,
    #[error("delivery to {to} failed: {reason}")]
    Delivery { to: String, reason: String },
}

/// Delivers a single message.
pub trait MailTransport: Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns `MailError::Delivery` if the message could not be sent.
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Transport that writes each message to the log instead of sending it.
///
/// Messages without a recipient are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError> {
        if message.to.trim().is_empty() {
            return Err(MailError::Delivery {
                to: message.to.clone(),
                reason: String::from("no recipient"),
            });
        }

        info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            content = %message.content,
            "Mail message"
        );
        Ok(())
    }
}

/// Sending half of the mail queue.
#[derive(Debug, Clone)]
pub struct Mailer {
    tx: mpsc::UnboundedSender<MailMessage>,
}

impl Mailer {
    /// Creates a mailer and the receiver to hand to `run_mail_loop`.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MailMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues a message without waiting for delivery.
    ///
    /// # Errors
    ///
    /// Returns `MailError::QueueClosed` if the mail loop has stopped.
    pub fn send(&self, message: MailMessage) -> Result<(), MailError> {
        self.tx.send(message).map_err(|_| MailError::QueueClosed)
    }
}

/// Delivers queued messages one at a time until every `Mailer` is dropped.
pub async fn run_mail_loop<T: MailTransport>(
    mut rx: mpsc::UnboundedReceiver<MailMessage>,
    transport: T,
) {
    info!("Mail loop started");

    while let Some(message) = rx.recv().await {
        match transport.deliver(&message) {
            Ok(()) => info!(to = %message.to, subject = %message.subject, "Mail delivered"),
            Err(e) => error!(to = %message.to, error = %e, "Mail delivery failed"),
        }
    }

    info!("Mail loop stopped");
}
