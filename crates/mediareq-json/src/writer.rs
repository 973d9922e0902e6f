//! Document encoding.

use crate::Result;
use serde::Serialize;

/// How a document is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentStyle {
    /// Single-line output.
    Compact,

    /// Two-space indented output with a trailing newline, suited for
    /// hand inspection and version control.
    #[default]
    Pretty,
}

/// Serialize `value` into the bytes that will be written to disk.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if the value cannot be serialized.
///
/// # Examples
///
/// ```
/// use mediareq_json::{encode_document, DocumentStyle};
/// use std::collections::BTreeMap;
///
/// let mut doc = BTreeMap::new();
/// doc.insert("1234", "Dune");
///
/// let bytes = encode_document(&doc, DocumentStyle::Compact).unwrap();
/// assert_eq!(bytes, br#"{"1234":"Dune"}"#);
/// ```
pub fn encode_document<T>(value: &T, style: DocumentStyle) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let bytes = match style {
        DocumentStyle::Compact => serde_json::to_vec(value)?,
        DocumentStyle::Pretty => {
            let mut bytes = serde_json::to_vec_pretty(value)?;
            bytes.push(b'\n');
            bytes
        }
    };
    Ok(bytes)
}
