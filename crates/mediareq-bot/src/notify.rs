//! Direct-message delivery.
//!
//! The dispatcher tells the administrator about new requests and tells
//! requesters about status changes. Delivery happens after the store change
//! has been persisted, so a failed notification never undoes a command.

use crate::error::Result;
use async_trait::async_trait;
use mediareq::domain::UserId;
use tracing::info;

/// Sends direct messages to platform users.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `recipient`.
    async fn send(&self, recipient: &UserId, message: &str) -> Result<()>;
}

/// Notifier that writes every message to the log.
///
/// Used by the stdio host, which has no platform connection to send
/// direct messages over.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &UserId, message: &str) -> Result<()> {
        info!(recipient = %recipient, message, "Direct message");
        Ok(())
    }
}
