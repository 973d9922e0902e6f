//! Implementation of the `init` command and the repository configuration.
//!
//! A mediareq repository is a directory containing `.mediareq/config.yaml`.
//! The request data file it points at is created on the first store open.

use crate::domain::UserId;
use crate::error::{ConfigError, Result};
use crate::storage::StorageBackend;
use mediareq_json::DocumentStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the mediareq directory
pub const MEDIAREQ_DIR_NAME: &str = ".mediareq";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the request data file
pub const REQUESTS_FILE_NAME: &str = "requests.json";

/// Environment variable that overrides `admin-id`
pub const ADMIN_ID_ENV: &str = "ADMIN_ID";

/// Maximum directory depth to traverse when searching for the repository root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for mediareq
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediareqConfig {
    /// The one user allowed to triage requests
    #[serde(rename = "admin-id")]
    pub admin_id: String,

    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type: "json" or "memory"
    pub backend: String,

    /// Path to the data file, relative to the repository root
    pub data_file: String,

    /// Pretty-print the data file
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl StorageConfig {
    /// Resolve the configured backend against the repository root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownBackend` for an unrecognized backend name.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StorageBackend> {
        match self.backend.as_str() {
            "json" => Ok(StorageBackend::Json {
                path: root_dir.join(&self.data_file),
                style: if self.pretty {
                    DocumentStyle::Pretty
                } else {
                    DocumentStyle::Compact
                },
            }),
            "memory" => Ok(StorageBackend::InMemory),
            other => Err(ConfigError::UnknownBackend(other.to_string()).into()),
        }
    }
}

impl MediareqConfig {
    /// Create a new configuration for the given administrator
    pub fn new(admin_id: &str) -> Self {
        Self {
            admin_id: admin_id.to_string(),
            storage: StorageConfig {
                backend: "json".to_string(),
                data_file: format!("{MEDIAREQ_DIR_NAME}/{REQUESTS_FILE_NAME}"),
                pretty: true,
            },
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// stored admin id is invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_admin_id(&config.admin_id)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Apply the `ADMIN_ID` environment override, if set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAdminId` if the variable is set to an
    /// invalid value.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_admin_override(std::env::var(ADMIN_ID_ENV).ok())
    }

    /// Apply an explicit admin id override. `None` keeps the current value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAdminId` if the override is invalid.
    pub fn with_admin_override(mut self, admin_id: Option<String>) -> Result<Self> {
        if let Some(admin_id) = admin_id {
            let admin_id = admin_id.trim().to_string();
            validate_admin_id(&admin_id)?;
            debug!("Admin id overridden from environment");
            self.admin_id = admin_id;
        }
        Ok(self)
    }

    /// The administrator as a user id.
    #[must_use]
    pub fn admin(&self) -> UserId {
        UserId::new(self.admin_id.clone())
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.mediareq` directory
    pub mediareq_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path the request data will be stored at
    pub requests_file: PathBuf,
    /// The configured administrator
    pub admin_id: String,
}

/// Validate an administrator id.
///
/// Ids are opaque platform identifiers: non-empty and free of whitespace.
/// Expects pre-trimmed input.
///
/// # Errors
///
/// Returns `ConfigError::InvalidAdminId` if the id is empty or contains whitespace.
pub fn validate_admin_id(admin_id: &str) -> Result<()> {
    if admin_id.is_empty() || admin_id.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidAdminId(admin_id.to_string()).into());
    }
    Ok(())
}

/// Initialize a new mediareq repository in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - The `.mediareq/` directory already exists
/// - The admin id is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, admin_id: &str) -> Result<InitResult> {
    let admin_id = admin_id.trim();
    validate_admin_id(admin_id)?;

    let mediareq_dir = base_dir.join(MEDIAREQ_DIR_NAME);
    if mediareq_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(PathBuf::from(MEDIAREQ_DIR_NAME)).into());
    }

    fs::create_dir_all(&mediareq_dir).await?;

    let config_file = mediareq_dir.join(CONFIG_FILE_NAME);
    let config = MediareqConfig::new(admin_id);
    config.save(&config_file).await?;

    debug!(dir = %mediareq_dir.display(), "Initialized mediareq repository");

    Ok(InitResult {
        requests_file: base_dir.join(&config.storage.data_file),
        mediareq_dir,
        config_file,
        admin_id: admin_id.to_string(),
    })
}

/// Find the repository root by searching up the directory tree.
///
/// Returns the directory containing `.mediareq/`, or `None` if the
/// filesystem root or the depth limit is reached first.
pub fn find_mediareq_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(MEDIAREQ_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

/// Locate the repository from `working_dir` and load its configuration.
///
/// Returns the repository root and the configuration with environment
/// overrides applied.
///
/// # Errors
///
/// Returns `ConfigError::NotInitialized` if no repository is found, or any
/// error from loading the configuration.
pub async fn discover(working_dir: &Path) -> Result<(PathBuf, MediareqConfig)> {
    let root_dir = find_mediareq_root(working_dir).ok_or(ConfigError::NotInitialized)?;
    let config_path = root_dir.join(MEDIAREQ_DIR_NAME).join(CONFIG_FILE_NAME);
    let config = MediareqConfig::load(&config_path)
        .await?
        .with_env_overrides()?;
    Ok((root_dir, config))
}
