//! Command execution logic.

use anyhow::Result;

use super::args::{ClearArgs, InfoArgs, InitArgs, ListArgs, RequestArgs, StatusArgs};
use crate::app::App;
use crate::domain::{NewTicket, TicketStatus, UserId};
use crate::output::{self, OutputConfig, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing mediareq repository...");
    }

    let result = init::init(&current_dir, &args.admin_id).await?;

    if !args.quiet {
        println!("Initialized mediareq in {}", result.mediareq_dir.display());
        println!("  Config:   {}", result.config_file.display());
        println!("  Requests: {}", result.requests_file.display());
        println!("  Admin:    {}", result.admin_id);
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let tickets = app.storage().list(None).await?;
    let counts: Vec<(TicketStatus, usize)> = TicketStatus::ALL
        .into_iter()
        .map(|status| {
            let n = tickets.iter().filter(|t| t.status == status).count();
            (status, n)
        })
        .collect();

    let data_path = app
        .backend()
        .data_path()
        .map_or_else(|| "(in memory)".to_string(), |p| p.display().to_string());

    match output_mode {
        OutputMode::Json => {
            let by_status: serde_json::Map<String, serde_json::Value> = counts
                .iter()
                .map(|(status, n)| (status.as_str().to_string(), (*n).into()))
                .collect();
            output::print_json(&serde_json::json!({
                "data_path": data_path,
                "admin_id": app.admin_id(),
                "requests": {
                    "total": tickets.len(),
                    "by_status": by_status,
                }
            }))?;
        }
        OutputMode::Text => {
            let summary = counts
                .iter()
                .map(|(status, n)| format!("{n} {}", status.label()))
                .collect::<Vec<_>>()
                .join(", ");

            println!("Mediareq Repository Information");
            println!("===============================");
            println!();
            println!("Data file: {data_path}");
            println!("Admin:     {}", app.admin_id());
            println!();
            println!("Requests: {} total ({summary})", tickets.len());
        }
    }

    Ok(())
}

/// Execute the request command
pub async fn execute_request(
    app: &mut App,
    args: &RequestArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let requester = args
        .user_id
        .clone()
        .map_or_else(|| app.admin_id().clone(), UserId::new);

    let ticket = app
        .storage_mut()
        .create(NewTicket::new(requester, args.username.clone(), args.title.clone()))
        .await?;

    match output_mode {
        OutputMode::Json => output::print_json(&ticket)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{} {}",
                output::success("Created request:", &config),
                ticket.id
            );
        }
    }

    Ok(())
}

/// Execute the status command
pub async fn execute_status(
    app: &mut App,
    args: &StatusArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let status = TicketStatus::from(args.status);
    let ticket = app
        .storage_mut()
        .set_status(&args.request_id, status)
        .await?;

    match output_mode {
        OutputMode::Json => output::print_json(&ticket)?,
        OutputMode::Text => {
            println!(
                "Request {} status updated to {}.",
                ticket.id,
                status.label()
            );
            output::print_ticket(&ticket, OutputMode::Text)?;
        }
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let tickets = app.storage().list(args.status.map(Into::into)).await?;
    output::print_tickets(&tickets, output_mode)?;
    Ok(())
}

/// Execute the clear command
pub async fn execute_clear(app: &mut App, args: &ClearArgs, output_mode: OutputMode) -> Result<()> {
    let status = TicketStatus::from(args.status);
    let removed = app.storage_mut().clear(status).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "status": status,
            "removed": removed,
        }))?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let message = format!(
                "Cleared {removed} request(s) with status \"{}\".",
                status.label()
            );
            if removed == 0 {
                println!("{}", output::warning(&message, &config));
            } else {
                println!("{}", output::success(&message, &config));
            }
        }
    }

    Ok(())
}
