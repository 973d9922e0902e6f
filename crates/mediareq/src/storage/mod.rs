//! Storage abstraction layer for media request tickets.
//!
//! This module provides the core storage trait and factory for creating
//! storage backends:
//!
//! - **In-memory**: ephemeral storage, useful for tests and dry runs
//! - **JSON**: the in-memory store plus a whole-document JSON file that is
//!   rewritten after every successful mutation
//!
//! # Architecture
//!
//! The trait is async because the file-backed store persists through
//! `tokio::fs`. It is object-safe, so callers hold a
//! `Box<dyn TicketStorage>` regardless of backend.
//!
//! # Example
//!
//! ```no_run
//! use mediareq::domain::{NewTicket, TicketStatus};
//! use mediareq::id_generation::IdGenerator;
//! use mediareq::storage::{StorageBackend, create_storage};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut storage = create_storage(StorageBackend::InMemory, IdGenerator::random()).await?;
//!
//!     let ticket = storage.create(NewTicket::new("42", "alice", "Dune")).await?;
//!     storage.set_status(&ticket.id, TicketStatus::Fulfilled).await?;
//!
//!     println!("Fulfilled request {}", ticket.id);
//!     Ok(())
//! }
//! ```

use crate::domain::{NewTicket, Ticket, TicketId, TicketStatus};
use crate::error::{Result, StorageError};
use crate::id_generation::IdGenerator;
use async_trait::async_trait;
pub use mediareq_json::DocumentStyle;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub mod in_memory;

/// Core storage trait for ticket management.
///
/// # Method Categories
///
/// - **Mutations**: `create`, `set_status`, `clear`
/// - **Queries**: `get`, `list`
/// - **Batch Operations**: `import_tickets`, `export_all`
/// - **Persistence**: `save`, `reload`
///
/// # Errors
///
/// - `TicketNotFound`: the id is not in the store
/// - `InvalidStatus`: a status update tried to set `pending`
/// - `IdSpaceExhausted`: all 9000 ids are in use
/// - `Storage`: the durable copy could not be read or written
///
/// # Persistence
///
/// File-backed implementations write the whole store after every successful
/// mutation and before returning. When that write fails the mutation stays
/// applied in memory and the persistence error is returned; call
/// [`reload`](TicketStorage::reload) to bring memory back in line with disk.
#[async_trait]
pub trait TicketStorage: Send + Sync {
    /// Create a new `pending` ticket with a fresh id.
    ///
    /// Implementations **MUST** call `ticket.validate()` first.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTitle` for a bad title and
    /// `Error::IdSpaceExhausted` when no id is free.
    async fn create(&mut self, ticket: NewTicket) -> Result<Ticket>;

    /// Get a ticket by id.
    ///
    /// Returns `None` if the ticket doesn't exist.
    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>>;

    /// Overwrite the status of an existing ticket and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// - `Error::TicketNotFound` if the ticket doesn't exist (checked first)
    /// - `Error::InvalidStatus` if `status` is `pending`
    async fn set_status(&mut self, id: &TicketId, status: TicketStatus) -> Result<Ticket>;

    /// Tickets in insertion order, optionally restricted to one status.
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>>;

    /// Remove every ticket with `status` and return how many were removed.
    async fn clear(&mut self, status: TicketStatus) -> Result<usize>;

    /// Replace the whole store with `tickets`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidData` if two tickets share an id. The
    /// store is left unchanged in that case.
    async fn import_tickets(&mut self, tickets: Vec<Ticket>) -> Result<()>;

    /// All tickets in insertion order.
    async fn export_all(&self) -> Result<Vec<Ticket>>;

    /// Write the store to its durable copy.
    ///
    /// A no-op for in-memory storage.
    async fn save(&self) -> Result<()>;

    /// Reload state from the durable copy, discarding in-memory changes.
    ///
    /// A missing file resets the store to empty. If the file cannot be read
    /// or decoded the current in-memory state is kept and the error returned.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// In-memory storage mirrored to a JSON document
    Json {
        /// Location of the document
        path: PathBuf,
        /// Output formatting
        style: DocumentStyle,
    },
}

impl StorageBackend {
    /// Returns the data file path for file-based backends.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::Json { path, .. } => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Wrapper that adds JSON file persistence to the in-memory store.
///
/// Every successful mutation is followed by a full save before the result is
/// returned.
struct JsonBackedStorage {
    inner: Box<dyn TicketStorage>,
    path: PathBuf,
    style: DocumentStyle,
}

impl JsonBackedStorage {
    async fn persist(&self) -> Result<()> {
        in_memory::save_to_json(self.inner.as_ref(), &self.path, self.style).await
    }
}

#[async_trait]
impl TicketStorage for JsonBackedStorage {
    async fn create(&mut self, ticket: NewTicket) -> Result<Ticket> {
        let ticket = self.inner.create(ticket).await?;
        self.persist().await?;
        Ok(ticket)
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>> {
        self.inner.get(id).await
    }

    async fn set_status(&mut self, id: &TicketId, status: TicketStatus) -> Result<Ticket> {
        let ticket = self.inner.set_status(id, status).await?;
        self.persist().await?;
        Ok(ticket)
    }

    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        self.inner.list(status).await
    }

    async fn clear(&mut self, status: TicketStatus) -> Result<usize> {
        let removed = self.inner.clear(status).await?;
        self.persist().await?;
        Ok(removed)
    }

    async fn import_tickets(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        self.inner.import_tickets(tickets).await?;
        self.persist().await
    }

    async fn export_all(&self) -> Result<Vec<Ticket>> {
        self.inner.export_all().await
    }

    async fn save(&self) -> Result<()> {
        self.persist().await
    }

    async fn reload(&mut self) -> Result<()> {
        let tickets = in_memory::load_from_json(&self.path).await?.unwrap_or_default();
        debug!(path = %self.path.display(), count = tickets.len(), "Reloading requests from disk");
        self.inner.import_tickets(tickets).await
    }
}

/// Create a storage instance for the given backend.
///
/// For [`StorageBackend::Json`] the document is loaded if it exists. A
/// missing document starts an empty store which is written immediately, so
/// the file exists after the first successful open.
///
/// # Errors
///
/// - `StorageError::Load` if the document exists but cannot be read or decoded
/// - `StorageError::InvalidData` if the document repeats an id
/// - `StorageError::Persist` if the initial empty document cannot be written
pub async fn create_storage(
    backend: StorageBackend,
    id_generator: IdGenerator,
) -> Result<Box<dyn TicketStorage>> {
    match backend {
        StorageBackend::InMemory => Ok(in_memory::new_in_memory_storage(id_generator)),
        StorageBackend::Json { path, style } => {
            let mut inner = in_memory::new_in_memory_storage(id_generator);
            let storage = match in_memory::load_from_json(&path).await? {
                Some(tickets) => {
                    debug!(path = %path.display(), count = tickets.len(), "Loaded requests");
                    inner.import_tickets(tickets).await?;
                    JsonBackedStorage { inner, path, style }
                }
                None => {
                    debug!(path = %path.display(), "No request file yet, starting empty");
                    let storage = JsonBackedStorage { inner, path, style };
                    storage.persist().await?;
                    storage
                }
            };
            Ok(Box::new(storage))
        }
    }
}

/// Like [`create_storage`], but an unreadable document does not stop startup.
///
/// On a load failure the error is logged, the unreadable file is moved aside
/// to the first free name of `<name>.corrupt`, `<name>.corrupt.1`, ... and an
/// empty store is started in its place. Used by long-running hosts that must
/// come up regardless.
///
/// # Errors
///
/// - `StorageError::Quarantine` if the unreadable file cannot be moved aside.
///   The file is left untouched.
/// - `StorageError::Persist` if the fresh empty document cannot be written.
pub async fn open_storage_lenient(
    backend: StorageBackend,
    id_generator: IdGenerator,
) -> Result<Box<dyn TicketStorage>> {
    let StorageBackend::Json { path, style } = backend else {
        return create_storage(backend, id_generator).await;
    };

    let tickets = match in_memory::load_from_json(&path).await {
        Ok(tickets) => tickets,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load requests, starting with an empty store");
            quarantine(&path).await?;
            None
        }
    };

    let mut inner = in_memory::new_in_memory_storage(id_generator);
    if let Some(tickets) = tickets {
        if let Err(e) = inner.import_tickets(tickets).await {
            error!(path = %path.display(), error = %e, "Request file is inconsistent, starting with an empty store");
            quarantine(&path).await?;
        }
    }

    let storage = JsonBackedStorage { inner, path, style };
    storage.persist().await?;
    Ok(Box::new(storage))
}

/// Maximum numbered quarantine copies kept next to the data file
const MAX_QUARANTINE_COPIES: usize = 1000;

/// Move an unreadable data file to a name no other file holds.
///
/// Returns the new location.
async fn quarantine(path: &Path) -> Result<PathBuf> {
    let failed = |source: std::io::Error| StorageError::Quarantine {
        path: path.to_path_buf(),
        source,
    };

    for n in 0..MAX_QUARANTINE_COPIES {
        let mut target = path.as_os_str().to_owned();
        target.push(".corrupt");
        if n > 0 {
            target.push(format!(".{n}"));
        }
        let target = PathBuf::from(target);

        if tokio::fs::try_exists(&target).await.map_err(failed)? {
            continue;
        }

        tokio::fs::rename(path, &target).await.map_err(failed)?;
        debug!(from = %path.display(), to = %target.display(), "Moved unreadable request file aside");
        return Ok(target);
    }

    Err(failed(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("{MAX_QUARANTINE_COPIES} quarantined copies already present"),
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTicket;
    use tempfile::TempDir;

    fn json_backend(dir: &TempDir) -> StorageBackend {
        StorageBackend::Json {
            path: dir.path().join("requests.json"),
            style: DocumentStyle::Pretty,
        }
    }

    #[tokio::test]
    async fn json_reload_restores_disk_state() {
        let dir = TempDir::new().unwrap();
        let mut storage = create_storage(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();

        let created = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        // Change the file behind the store's back
        tokio::fs::write(dir.path().join("requests.json"), "{}")
            .await
            .unwrap();
        storage.reload().await.unwrap();

        assert!(storage.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn json_reload_missing_file_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let mut storage = create_storage(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();
        storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        std::fs::remove_file(dir.path().join("requests.json")).unwrap();
        storage.reload().await.unwrap();

        assert!(storage.export_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn json_reload_corrupt_file_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut storage = create_storage(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();
        let created = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        tokio::fs::write(dir.path().join("requests.json"), "not json")
            .await
            .unwrap();
        let result = storage.reload().await;

        assert!(result.unwrap_err().is_persistence_failure());
        assert!(storage.get(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn in_memory_reload_is_noop() {
        let mut storage = create_storage(StorageBackend::InMemory, IdGenerator::random())
            .await
            .unwrap();
        let created = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        storage.reload().await.unwrap();

        assert!(storage.get(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn lenient_open_moves_corrupt_file_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        tokio::fs::write(&path, "{ broken").await.unwrap();

        let storage = open_storage_lenient(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();

        assert!(storage.export_all().await.unwrap().is_empty());
        let aside = tokio::fs::read_to_string(dir.path().join("requests.json.corrupt"))
            .await
            .unwrap();
        assert_eq!(aside, "{ broken");
        let fresh = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(fresh.trim(), "{}");
    }

    #[tokio::test]
    async fn lenient_open_keeps_earlier_quarantined_copies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");

        tokio::fs::write(&path, "{ first").await.unwrap();
        open_storage_lenient(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();
        tokio::fs::write(&path, "{ second").await.unwrap();
        open_storage_lenient(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();

        let first = tokio::fs::read_to_string(dir.path().join("requests.json.corrupt"))
            .await
            .unwrap();
        let second = tokio::fs::read_to_string(dir.path().join("requests.json.corrupt.1"))
            .await
            .unwrap();
        assert_eq!(first, "{ first");
        assert_eq!(second, "{ second");
    }

    #[tokio::test]
    async fn lenient_open_skips_occupied_quarantine_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        let occupied = dir.path().join("requests.json.corrupt");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("keep"), "x").unwrap();
        tokio::fs::write(&path, "{ broken").await.unwrap();

        open_storage_lenient(json_backend(&dir), IdGenerator::random())
            .await
            .unwrap();

        assert!(occupied.join("keep").exists());
        let aside = tokio::fs::read_to_string(dir.path().join("requests.json.corrupt.1"))
            .await
            .unwrap();
        assert_eq!(aside, "{ broken");
    }

    // The quarantine name exceeds the 255-byte file name limit, so the move fails.
    #[cfg(unix)]
    #[tokio::test]
    async fn lenient_open_never_overwrites_file_it_cannot_move() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(format!("{}.json", "r".repeat(245)));
        tokio::fs::write(&path, "{ broken").await.unwrap();
        let backend = StorageBackend::Json {
            path: path.clone(),
            style: DocumentStyle::Pretty,
        };

        let result = open_storage_lenient(backend, IdGenerator::random()).await;

        let err = result.err().unwrap();
        assert!(matches!(
            err,
            crate::error::Error::Storage(StorageError::Quarantine { .. })
        ));
        assert!(err.is_persistence_failure());
        let untouched = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(untouched, "{ broken");
    }

    #[tokio::test]
    async fn strict_open_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("requests.json"), "{ broken")
            .await
            .unwrap();

        let result = create_storage(json_backend(&dir), IdGenerator::random()).await;

        assert!(result.err().unwrap().is_persistence_failure());
    }

    #[test]
    fn data_path_only_for_json() {
        let backend = StorageBackend::Json {
            path: PathBuf::from("requests.json"),
            style: DocumentStyle::Compact,
        };
        assert_eq!(backend.data_path(), Some(Path::new("requests.json")));
        assert_eq!(StorageBackend::InMemory.data_path(), None);
    }
}
