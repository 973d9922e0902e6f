//! In-memory ticket storage.
//!
//! All tickets live in RAM and are **lost when the process exits** unless the
//! store is wrapped by the JSON backend (see [`crate::storage::create_storage`]).
//!
//! # Persistence
//!
//! [`load_from_json`] and [`save_to_json`] convert between the store and the
//! on-disk document. The trait's `save()` and `reload()` are no-ops here.
//!
//! # Architecture
//!
//! - `HashMap<TicketId, Ticket>` for O(1) lookups
//! - `Vec<TicketId>` recording insertion order, which `list` and the saved
//!   document follow
//! - An [`IdGenerator`](crate::id_generation::IdGenerator) drawing random ids
//!   and resampling on collision
//!
//! # Thread Safety
//!
//! The store is wrapped in `Arc<Mutex<TicketStoreInner>>`; every operation
//! takes the lock for its full duration.
//!
//! # Performance Characteristics
//!
//! - Create: O(1) expected while the id space is sparse
//! - Get / set status: O(1)
//! - List / clear: O(n)

mod inner;
mod json;
mod trait_impl;

use crate::id_generation::IdGenerator;
use crate::storage::TicketStorage;
use inner::TicketStoreInner;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use json::{StoredTicket, TicketDocument, load_from_json, save_to_json};

/// Thread-safe in-memory storage.
pub(crate) type InMemoryStorage = Arc<Mutex<TicketStoreInner>>;

/// Create an empty in-memory store.
///
/// # Example
///
/// ```
/// use mediareq::id_generation::IdGenerator;
/// use mediareq::storage::in_memory::new_in_memory_storage;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let storage = new_in_memory_storage(IdGenerator::random());
///     assert!(storage.export_all().await.unwrap().is_empty());
/// }
/// ```
#[must_use]
pub fn new_in_memory_storage(id_generator: IdGenerator) -> Box<dyn TicketStorage> {
    Box::new(Arc::new(Mutex::new(TicketStoreInner::new(id_generator))))
}
