//! Document reading.
//!
//! A missing file is not an error: [`read_document`] returns `Ok(None)` so the
//! caller can decide whether to bootstrap an empty document. Every other
//! failure (permissions, truncated or corrupt JSON) is reported.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads and decodes the document at `path`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is empty, or does
/// not decode as `T`.
///
/// # Examples
///
/// ```no_run
/// use mediareq_json::read_document;
/// use std::collections::BTreeMap;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let doc: Option<BTreeMap<String, String>> = read_document("requests.json").await?;
/// match doc {
///     Some(entries) => println!("{} entries", entries.len()),
///     None => println!("no document yet"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn read_document<T, P>(path: P) -> Result<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Document does not exist");
            return Ok(None);
        }
        Err(e) => return Err(Error::Io(e)),
    };

    decode_document(&bytes).map(Some)
}

/// Decodes a document from raw bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] for an empty or whitespace-only input and
/// [`Error::Json`] when the bytes are not valid JSON for `T`.
pub fn decode_document<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::InvalidFormat("document is empty".to_string()));
    }
    Ok(serde_json::from_slice(bytes)?)
}
