//! Atomic write operations for JSON documents.
//!
//! On POSIX systems a rename within one filesystem is atomic, which gives
//! crash-safe replacement of the document:
//!
//! 1. The encoded document is written to `<name>.tmp` next to the target
//! 2. The temporary file is flushed and synced
//! 3. The temporary file is renamed over the target path
//!
//! If a crash happens before step 3 the previous document stays intact. The
//! temporary file may be left behind and is overwritten by the next save.
//!
//! # Examples
//!
//! ```no_run
//! use mediareq_json::{write_document_atomic, DocumentStyle};
//! use std::collections::BTreeMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = BTreeMap::new();
//! doc.insert("4821", "Dune");
//!
//! write_document_atomic("requests.json", &doc, DocumentStyle::Pretty).await?;
//! # Ok(())
//! # }
//! ```

use crate::{DocumentStyle, Result, encode_document};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::trace;

/// Atomically replaces the document at `path` with `value`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if:
/// - The value fails to serialize (nothing is written in that case)
/// - The temporary file cannot be created or written
/// - The rename fails (e.g., cross-filesystem move)
///
/// On failure the original document, if any, is left unchanged.
pub async fn write_document_atomic<T, P>(path: P, value: &T, style: DocumentStyle) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Encode first so a serialization error never touches the filesystem
    let bytes = encode_document(value, style)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, &bytes).await {
        // Best-effort cleanup of temp file
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    trace!(path = %path.display(), bytes = bytes.len(), "Document written");

    Ok(())
}

/// Creates a temporary file path for atomic write operations.
///
/// `.tmp` is appended to the full file name, so `requests.json` becomes
/// `requests.json.tmp` and `data` becomes `data.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
