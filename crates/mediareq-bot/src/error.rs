//! Error types for the mediareq bot.

use mediareq::domain::UserId;
use mediareq::error::Error as StoreError;
use thiserror::Error;

/// Errors that can occur while handling an interaction.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller is not the configured administrator.
    #[error("User {0} is not allowed to use this command")]
    PermissionDenied(UserId),

    /// Invalid argument value provided.
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
    InvalidArgument {
        /// The field name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// Description of valid values.
        valid_values: &'static str,
    },

    /// A required command option was not supplied.
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),

    /// An error from the request store.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A notification could not be delivered.
    #[error("Failed to notify {recipient}: {reason}")]
    Notify {
        /// Intended recipient.
        recipient: UserId,
        /// What went wrong.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Text that can be shown to the user who triggered the error.
    ///
    /// Validation problems are described; anything internal collapses to a
    /// generic message naming `action` (e.g. "updating the status").
    #[must_use]
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::PermissionDenied(_) => "You don't have permission to use this command.".to_string(),
            Self::InvalidArgument {
                field: "request_id",
                ..
            }
            | Self::Store(StoreError::TicketNotFound(_) | StoreError::InvalidTicketId(_)) => {
                "Invalid request ID.".to_string()
            }
            Self::InvalidArgument { .. } | Self::MissingOption(_) => self.to_string(),
            Self::Store(
                e @ (StoreError::InvalidStatus(_)
                | StoreError::UnknownStatus(_)
                | StoreError::InvalidTitle(_)),
            ) => e.to_string(),
            Self::Store(_) | Self::Notify { .. } | Self::Io(_) | Self::Json(_) => {
                format!("An error occurred while {action}. Please try again later.")
            }
        }
    }

    /// Whether the error is the caller's fault rather than the bot's.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::PermissionDenied(_) | Self::InvalidArgument { .. } | Self::MissingOption(_) => {
                true
            }
            Self::Store(e) => matches!(
                e,
                StoreError::TicketNotFound(_)
                    | StoreError::InvalidStatus(_)
                    | StoreError::InvalidTicketId(_)
                    | StoreError::UnknownStatus(_)
                    | StoreError::InvalidTitle(_)
            ),
            Self::Notify { .. } | Self::Io(_) | Self::Json(_) => false,
        }
    }
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, Error>;
