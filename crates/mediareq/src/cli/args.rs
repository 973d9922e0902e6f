//! CLI argument structs for all commands.

use clap::Parser;

use super::types::{NewStatusArg, TicketStatusArg};
use super::validators::{validate_admin_id, validate_ticket_id, validate_title, validate_user_id};
use crate::domain::TicketId;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Platform user id of the administrator
    ///
    /// Only this user may change, list or clear requests through the bot.
    #[arg(short, long, value_parser = validate_admin_id)]
    pub admin_id: String,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `request` command
#[derive(Parser, Debug, Clone)]
pub struct RequestArgs {
    /// Movie or show title (at most 200 characters)
    #[arg(long, value_parser = validate_title)]
    pub title: String,

    /// Requester user id (defaults to the administrator)
    #[arg(long, value_parser = validate_user_id)]
    pub user_id: Option<String>,

    /// Requester display name
    #[arg(long, default_value = "admin")]
    pub username: String,
}

/// Arguments for the `status` command
#[derive(Parser, Debug, Clone)]
pub struct StatusArgs {
    /// Request id (4 digits)
    #[arg(value_parser = validate_ticket_id)]
    pub request_id: TicketId,

    /// New status
    #[arg(value_enum)]
    pub status: NewStatusArg,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show requests with this status
    #[arg(short, long, value_enum)]
    pub status: Option<TicketStatusArg>,
}

/// Arguments for the `clear` command
#[derive(Parser, Debug, Clone)]
pub struct ClearArgs {
    /// Remove every request with this status
    #[arg(value_enum)]
    pub status: TicketStatusArg,
}
