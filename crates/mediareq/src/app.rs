//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use mediareq::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("admin: {}", app.admin_id());
//!     Ok(())
//! }
//! ```

use crate::commands::init::{self, MEDIAREQ_DIR_NAME};
use crate::domain::UserId;
use crate::error::Result;
use crate::id_generation::IdGenerator;
use crate::storage::{StorageBackend, TicketStorage, create_storage};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Owns the ticket store opened from the repository found at or above the
/// working directory.
pub struct App {
    storage: Box<dyn TicketStorage>,
    mediareq_dir: PathBuf,
    admin: UserId,
    backend: StorageBackend,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mediareq_dir", &self.mediareq_dir)
            .field("admin", &self.admin)
            .field("backend", &self.backend)
            .field("storage", &"<dyn TicketStorage>")
            .finish()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.mediareq/`, loads the
    /// configuration (with the `ADMIN_ID` override) and opens the store. A
    /// corrupt data file is an error here; the CLI never discards data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No repository is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The data file cannot be read or created
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let (root_dir, config) = init::discover(working_dir).await?;
        let backend = config.storage.to_backend(&root_dir)?;
        let storage = create_storage(backend.clone(), IdGenerator::random()).await?;

        Ok(Self {
            storage,
            mediareq_dir: root_dir.join(MEDIAREQ_DIR_NAME),
            admin: config.admin(),
            backend,
        })
    }

    /// Get a mutable reference to the storage.
    pub fn storage_mut(&mut self) -> &mut dyn TicketStorage {
        self.storage.as_mut()
    }

    /// Get an immutable reference to the storage.
    pub fn storage(&self) -> &dyn TicketStorage {
        self.storage.as_ref()
    }

    /// The configured administrator.
    pub fn admin_id(&self) -> &UserId {
        &self.admin
    }

    /// Path to the `.mediareq` directory.
    pub fn mediareq_dir(&self) -> &Path {
        &self.mediareq_dir
    }

    /// The backend the store was opened with.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}
