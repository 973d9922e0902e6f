//! Crash-safe persistence of a single JSON document.
//!
//! The whole document is read into memory on load and rewritten on every
//! save. Writes go through a temporary file followed by a rename so a reader
//! never observes a half-written document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod writer;

pub use atomic::write_document_atomic;
pub use error::{Error, Result};
pub use reader::{decode_document, read_document};
pub use writer::{DocumentStyle, encode_document};
