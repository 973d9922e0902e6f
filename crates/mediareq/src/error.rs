//! Error types for mediareq operations.

use crate::domain::{TicketId, TicketStatus};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for mediareq operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No ticket with this id exists.
    #[error("Request not found: {0}")]
    TicketNotFound(TicketId),

    /// The status cannot be assigned through a status update.
    #[error("Status '{0}' cannot be assigned to an existing request")]
    InvalidStatus(TicketStatus),

    /// A string that is not a 4-digit ticket id in 1000-9999.
    #[error("Invalid request ID '{0}': expected a 4-digit number between 1000 and 9999")]
    InvalidTicketId(String),

    /// A status name that is not part of the lifecycle.
    #[error("Unknown status '{0}'. Valid values: pending, in_progress, fulfilled, rejected, delayed")]
    UnknownStatus(String),

    /// Request title failed validation.
    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    /// Every ticket id is already in use.
    #[error("No free request IDs left ({capacity} in use)")]
    IdSpaceExhausted {
        /// Number of ids in the space.
        capacity: usize,
    },
}

impl Error {
    /// Returns `true` when the error came from reading or writing the durable copy.
    #[must_use]
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Storage(
                    StorageError::Persist { .. }
                        | StorageError::Load { .. }
                        | StorageError::Quarantine { .. }
                )
        )
    }
}

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the durable copy failed.
    ///
    /// The mutation that triggered the write has already been applied in
    /// memory. Callers that need memory and disk to agree can call
    /// `reload()` on the storage.
    #[error("Failed to persist requests to {path}: {source}")]
    Persist {
        /// The data file being written.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: mediareq_json::Error,
    },

    /// Reading the durable copy failed.
    #[error("Failed to load requests from {path}: {source}")]
    Load {
        /// The data file being read.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: mediareq_json::Error,
    },

    /// An unreadable data file could not be moved aside.
    ///
    /// The file is left where it was and nothing is written over it.
    #[error("Failed to move unreadable request file {path} aside: {source}")]
    Quarantine {
        /// The unreadable data file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The stored data decoded but violates a store invariant.
    #[error("Invalid request data: {0}")]
    InvalidData(String),
}

/// Errors raised while locating or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.mediareq/` directory was found.
    #[error("Not a mediareq repository (or any parent directory). Run 'mediareq init' first.")]
    NotInitialized,

    /// `init` was run where a repository already exists.
    #[error("mediareq is already initialized in this directory. Found existing '{0}'")]
    AlreadyInitialized(PathBuf),

    /// The configuration file could not be parsed or written.
    #[error("Configuration error: {0}")]
    Parse(String),

    /// The administrator id is missing or malformed.
    #[error("Invalid admin id '{0}': must be non-empty and contain no whitespace")]
    InvalidAdminId(String),

    /// The storage backend name is not recognized.
    #[error("Unknown storage backend '{0}'. Valid values: json, memory")]
    UnknownBackend(String),
}

/// A specialized Result type for mediareq operations.
pub type Result<T> = std::result::Result<T, Error>;
