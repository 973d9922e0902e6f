//! CLI argument parsing and command dispatch.
//!
//! The admin CLI operates directly on the local request store as the
//! operator, so no permission checks apply here.
//!
//! # Commands
//!
//! - `init`: Initialize a new mediareq repository
//! - `info`: Show repository information and request counts
//! - `request`: Submit a request
//! - `status`: Change the status of a request
//! - `list`: List requests, optionally by status
//! - `clear`: Remove all requests with a status
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! mediareq init --admin-id 123456789
//! mediareq request --title "Dune" --user-id 42 --username alice
//! mediareq status 4821 fulfilled
//! mediareq list --status fulfilled
//! mediareq clear fulfilled
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{ClearArgs, InfoArgs, InitArgs, ListArgs, RequestArgs, StatusArgs};
pub use types::{NewStatusArg, TicketStatusArg};
pub use validators::{validate_admin_id, validate_ticket_id, validate_title, validate_user_id};

/// Mediareq - media request tracking
///
/// Manage movie and show requests submitted through the chat bot. Requests
/// are stored in `.mediareq/requests.json`.
#[derive(Parser, Debug)]
#[command(name = "mediareq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new mediareq repository
    ///
    /// Creates the `.mediareq/` directory with the configuration file.
    Init(InitArgs),

    /// Show repository information
    ///
    /// Displays the data file, the administrator and request counts.
    Info(InfoArgs),

    /// Submit a new request
    Request(RequestArgs),

    /// Change the status of a request
    Status(StatusArgs),

    /// List requests
    List(ListArgs),

    /// Remove every request with a given status
    Clear(ClearArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any error from locating the repository or running the command.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Request(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_request(&mut app, args, output_mode).await
            }
            Some(Commands::Status(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_status(&mut app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Some(Commands::Clear(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_clear(&mut app, args, output_mode).await
            }
            None => {
                println!("mediareq {}", env!("CARGO_PKG_VERSION"));
                println!("Run 'mediareq --help' for usage.");
                Ok(())
            }
        }
    }
}
