//! Command dispatch.
//!
//! The [`Dispatcher`] turns an [`Interaction`] into a store operation and a
//! [`Reply`]. The request store sits behind a shared lock.
//!
//! # Locking
//!
//! Mutating commands hold the store's write lock for the whole
//! mutate-and-persist sequence, so commands are applied one at a time and
//! each is durable (or has failed) before the next one starts. Notifications
//! are sent after the lock is released.

use crate::error::{Error, Result};
use crate::models::{Command, CommandKind, Interaction, InteractionUser, Reply};
use crate::notify::Notifier;
use crate::render;
use mediareq::domain::{NewTicket, TicketId, TicketStatus, UserId};
use mediareq::storage::TicketStorage;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Store handle shared between the dispatcher and its host.
pub type SharedStorage = Arc<RwLock<Box<dyn TicketStorage>>>;

/// Routes interactions to the request store.
#[derive(Clone)]
pub struct Dispatcher {
    storage: SharedStorage,
    admin: UserId,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher over `storage` with a single administrator.
    pub fn new(storage: SharedStorage, admin: UserId, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            storage,
            admin,
            notifier,
        }
    }

    /// Wrap an owned store for sharing with a dispatcher.
    #[must_use]
    pub fn share(storage: Box<dyn TicketStorage>) -> SharedStorage {
        Arc::new(RwLock::new(storage))
    }

    /// The shared store handle.
    #[must_use]
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// The administrator's user id.
    #[must_use]
    pub fn admin(&self) -> &UserId {
        &self.admin
    }

    /// Handle an interaction and produce the reply for the invoking user.
    ///
    /// Errors are logged and rendered as user-facing text.
    pub async fn handle(&self, interaction: &Interaction) -> Reply {
        let action = interaction
            .command
            .parse::<CommandKind>()
            .map_or(CommandKind::Request.action(), CommandKind::action);

        match self.dispatch(interaction).await {
            Ok(content) => Reply::ephemeral(content),
            Err(e) => {
                if e.is_user_error() {
                    debug!(command = %interaction.command, user = %interaction.user.id, error = %e, "Command rejected");
                } else {
                    error!(command = %interaction.command, user = %interaction.user.id, error = %e, "Command failed");
                }
                Reply::ephemeral(e.user_message(action))
            }
        }
    }

    /// Run an interaction and return the reply text.
    ///
    /// Authorization is checked before any option is decoded.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` for admin commands from anyone else,
    /// decoding errors for malformed options and store errors otherwise.
    pub async fn dispatch(&self, interaction: &Interaction) -> Result<String> {
        let kind: CommandKind = interaction.command.parse()?;
        if kind.requires_admin() && interaction.user.id != self.admin {
            warn!(command = %kind, user = %interaction.user.id, "Permission denied");
            return Err(Error::PermissionDenied(interaction.user.id.clone()));
        }

        match Command::decode(kind, interaction)? {
            Command::Request { title } => self.submit(&interaction.user, title).await,
            Command::Status { request_id, status } => self.set_status(&request_id, status).await,
            Command::List { status } => self.list(status).await,
            Command::Clear { status } => self.clear(status).await,
        }
    }

    async fn submit(&self, user: &InteractionUser, title: String) -> Result<String> {
        let ticket = {
            let mut storage = self.storage.write().await;
            storage
                .create(NewTicket::new(user.id.clone(), user.name.clone(), title))
                .await?
        };
        info!(id = %ticket.id, user = %user.id, "Request submitted");

        self.notify(&self.admin, &render::admin_notice(&ticket)).await;
        Ok(render::submitted(&ticket))
    }

    async fn set_status(&self, id: &TicketId, status: TicketStatus) -> Result<String> {
        let ticket = {
            let mut storage = self.storage.write().await;
            storage.set_status(id, status).await?
        };
        info!(id = %ticket.id, status = %ticket.status, "Request status updated");

        self.notify(&ticket.requester_id, &render::requester_notice(&ticket))
            .await;
        Ok(render::status_updated(&ticket))
    }

    async fn list(&self, status: Option<TicketStatus>) -> Result<String> {
        let tickets = self.storage.read().await.list(status).await?;
        Ok(render::ticket_list(&tickets, status))
    }

    async fn clear(&self, status: TicketStatus) -> Result<String> {
        let removed = self.storage.write().await.clear(status).await?;
        info!(status = %status, removed, "Requests cleared");
        Ok(render::cleared(removed, status))
    }

    async fn notify(&self, recipient: &UserId, message: &str) {
        if let Err(e) = self.notifier.send(recipient, message).await {
            warn!(recipient = %recipient, error = %e, "Notification failed");
        }
    }
}
