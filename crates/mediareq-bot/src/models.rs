//! Interaction wire models.
//!
//! An [`Interaction`] is one slash command invocation as delivered by the
//! chat platform. It is decoded into a typed [`Command`] at the dispatcher
//! boundary, and the dispatcher answers with a [`Reply`].

use crate::error::{Error, Result};
use mediareq::domain::{MAX_TITLE_LENGTH, TicketId, TicketStatus, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const STATUS_VALUES: &str = "pending, in_progress, fulfilled, rejected, delayed";
const COMMAND_VALUES: &str = "request, status, list, clear";

/// The user who triggered an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionUser {
    /// Platform user id.
    pub id: UserId,

    /// Display name at the time of the interaction.
    pub name: String,
}

/// A slash command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Who invoked the command.
    pub user: InteractionUser,

    /// Command name, e.g. `request`.
    pub command: String,

    /// Named string options.
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl Interaction {
    /// Build an interaction; mostly useful in tests.
    pub fn new(
        user_id: impl Into<UserId>,
        user_name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            user: InteractionUser {
                id: user_id.into(),
                name: user_name.into(),
            },
            command: command.into(),
            options: HashMap::new(),
        }
    }

    /// Add an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<&str> {
        self.option(name).ok_or(Error::MissingOption(name))
    }
}

/// The four commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Submit a request.
    Request,
    /// Change a request's status.
    Status,
    /// List requests.
    List,
    /// Remove requests by status.
    Clear,
}

impl CommandKind {
    /// Whether only the administrator may run this command.
    #[must_use]
    pub fn requires_admin(self) -> bool {
        !matches!(self, Self::Request)
    }

    /// What the command was doing, for failure messages.
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            Self::Request => "processing your request",
            Self::Status => "updating the status",
            Self::List => "listing requests",
            Self::Clear => "clearing requests",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Request => "request",
            Self::Status => "status",
            Self::List => "list",
            Self::Clear => "clear",
        })
    }
}

impl FromStr for CommandKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "request" => Ok(Self::Request),
            "status" => Ok(Self::Status),
            "list" => Ok(Self::List),
            "clear" => Ok(Self::Clear),
            _ => Err(Error::InvalidArgument {
                field: "command",
                value: s.to_string(),
                valid_values: COMMAND_VALUES,
            }),
        }
    }
}

/// A decoded, validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a request for `title`.
    Request {
        /// Requested movie or show.
        title: String,
    },
    /// Set the status of an existing request.
    Status {
        /// Target request.
        request_id: TicketId,
        /// New status. `pending` is rejected by the store.
        status: TicketStatus,
    },
    /// List requests, optionally filtered.
    List {
        /// Only show requests with this status.
        status: Option<TicketStatus>,
    },
    /// Remove every request with a status.
    Clear {
        /// Status to remove.
        status: TicketStatus,
    },
}

impl Command {
    /// Decode the options of `interaction` for a command of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `MissingOption` or `InvalidArgument` when an option is absent
    /// or malformed.
    pub fn decode(kind: CommandKind, interaction: &Interaction) -> Result<Self> {
        match kind {
            CommandKind::Request => {
                let title = interaction.required("title")?;
                if title.chars().count() > MAX_TITLE_LENGTH {
                    return Err(Error::InvalidArgument {
                        field: "title",
                        value: title.chars().take(32).collect::<String>() + "...",
                        valid_values: "at most 200 characters",
                    });
                }
                Ok(Self::Request {
                    title: title.to_string(),
                })
            }
            CommandKind::Status => {
                let raw_id = interaction.required("request_id")?;
                let request_id = TicketId::parse(raw_id).map_err(|_| Error::InvalidArgument {
                    field: "request_id",
                    value: raw_id.to_string(),
                    valid_values: "a 4-digit number between 1000 and 9999",
                })?;
                let status = parse_status(interaction.required("status")?)?;
                Ok(Self::Status { request_id, status })
            }
            CommandKind::List => Ok(Self::List {
                status: interaction.option("status").map(parse_status).transpose()?,
            }),
            CommandKind::Clear => Ok(Self::Clear {
                status: parse_status(interaction.required("status")?)?,
            }),
        }
    }
}

fn parse_status(s: &str) -> Result<TicketStatus> {
    s.parse().map_err(|_| Error::InvalidArgument {
        field: "status",
        value: s.to_string(),
        valid_values: STATUS_VALUES,
    })
}

/// Response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Message text (Markdown).
    pub content: String,

    /// Only visible to the invoking user.
    pub ephemeral: bool,
}

impl Reply {
    /// A reply only the invoking user sees.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}
