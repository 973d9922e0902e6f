//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (fulfilled, completed actions)
//!   - Warning/Active: yellow  (in progress, delayed)
//!   - Error:          red     (rejected, failures)
//!   - Info/Reference: cyan    (request ids)
//!   - Muted:          dimmed  (field labels, requester names)
//!   - Emphasis:       bold    (titles, headers)
//!   - Default:        white   (pending)

use crate::domain::TicketStatus;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Status icon used in chat replies and text output.
#[must_use]
pub fn status_icon(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Pending => "⏳",
        TicketStatus::InProgress => "🔄",
        TicketStatus::Fulfilled => "✅",
        TicketStatus::Rejected => "❌",
        TicketStatus::Delayed => "⏰",
    }
}

fn ascii_status_icon(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Pending => "o",
        TicketStatus::InProgress => ">",
        TicketStatus::Fulfilled => "+",
        TicketStatus::Rejected => "x",
        TicketStatus::Delayed => "~",
    }
}

fn paint(text: &str, status: TicketStatus) -> String {
    match status {
        TicketStatus::Pending => text.white().to_string(),
        TicketStatus::InProgress | TicketStatus::Delayed => text.yellow().to_string(),
        TicketStatus::Fulfilled => text.green().to_string(),
        TicketStatus::Rejected => text.red().to_string(),
    }
}

/// Apply color to the status label.
pub(crate) fn colorize_status(status: TicketStatus, config: &OutputConfig) -> String {
    let text = status.label();
    if !config.use_colors {
        return text.to_string();
    }
    paint(text, status)
}

/// Get a status icon, with ASCII fallback support.
///
/// Emoji icons carry their own color, so only the ASCII fallback is painted.
pub(crate) fn colored_status_icon(status: TicketStatus, config: &OutputConfig) -> String {
    if !config.use_ascii {
        return status_icon(status).to_string();
    }
    let icon = ascii_status_icon(status);
    if !config.use_colors {
        return icon.to_string();
    }
    paint(icon, status)
}

/// Colorize a request id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
