//! Output formatting for CLI commands.
//!
//! Commands print either human-readable text or JSON for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, status icons)

pub mod color;

use crate::domain::Ticket;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{status_icon, success, warning};

use color::{bold, colored_status_icon, colorize_id, colorize_status, dimmed};

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only icons instead of emoji.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `MEDIAREQ_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `MEDIAREQ_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let use_ascii = match env::var("MEDIAREQ_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "MEDIAREQ_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("MEDIAREQ_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a ticket in the specified format
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_ticket(ticket: &Ticket, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => write_ticket_text(&mut handle, ticket, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, ticket),
    }
}

/// Print a list of tickets in the specified format
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_tickets(tickets: &[Ticket], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => write_tickets_text(&mut handle, tickets, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &tickets),
    }
}

/// Print a JSON-formatted result for any serializable value
///
/// # Errors
///
/// Returns an error if serialization or writing to stdout fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_ticket_line<W: Write>(w: &mut W, ticket: &Ticket, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{} {}  {}  {}",
        colored_status_icon(ticket.status, config),
        colorize_id(ticket.id.as_str(), config),
        bold(&ticket.title, config),
        dimmed(&format!("(by {})", ticket.requester_name), config),
    )
}

fn write_ticket_text<W: Write>(w: &mut W, ticket: &Ticket, config: &OutputConfig) -> io::Result<()> {
    write_ticket_line(w, ticket, config)?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Status:", config),
        colorize_status(ticket.status, config)
    )?;
    writeln!(
        w,
        "  {} {} ({})",
        dimmed("Requested by:", config),
        ticket.requester_name,
        ticket.requester_id
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Requested at:", config),
        ticket.requested_at.to_rfc3339()
    )?;
    if let Some(updated_at) = ticket.updated_at {
        writeln!(
            w,
            "  {} {}",
            dimmed("Updated at:", config),
            updated_at.to_rfc3339()
        )?;
    }
    Ok(())
}

fn write_tickets_text<W: Write>(
    w: &mut W,
    tickets: &[Ticket],
    config: &OutputConfig,
) -> io::Result<()> {
    if tickets.is_empty() {
        writeln!(w, "No requests found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} request(s):", tickets.len())?;
    writeln!(w)?;

    for ticket in tickets {
        write_ticket_line(w, ticket, config)?;
    }

    Ok(())
}
