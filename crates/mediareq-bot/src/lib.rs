//! Chat bot host for mediareq.
//!
//! Users submit media requests through slash commands; a single
//! administrator changes their status, lists them and clears them out.
//!
//! # Architecture
//!
//! - [`models`]: wire format of interactions and replies, typed commands
//! - [`dispatcher`]: authorization, store calls and notifications
//! - [`render`]: chat message wording
//! - [`notify`]: the direct-message collaborator
//! - [`server`]: a JSON-lines host over stdin/stdout
//!
//! # Commands
//!
//! - `request` - Submit a request (anyone)
//! - `status` - Change the status of a request (admin)
//! - `list` - List requests, optionally by status (admin)
//! - `clear` - Remove all requests with a status (admin)

pub mod dispatcher;
pub mod error;
pub mod models;
pub mod notify;
pub mod render;
pub mod server;

pub use dispatcher::{Dispatcher, SharedStorage};
pub use error::{Error, Result};
pub use notify::{LogNotifier, Notifier};
pub use server::BotServer;
