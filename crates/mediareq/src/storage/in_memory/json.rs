//! JSON document persistence for the in-memory store.
//!
//! The whole store is one JSON object keyed by ticket id:
//!
//! ```json
//! {
//!   "4821": {
//!     "userId": "42",
//!     "username": "alice",
//!     "title": "Dune",
//!     "status": "fulfilled",
//!     "requestedAt": "2024-05-01T10:00:00Z",
//!     "updatedAt": "2024-05-02T08:30:00Z"
//!   }
//! }
//! ```
//!
//! Keys are written in insertion order and read back in file order, so a
//! save followed by a load reproduces the store exactly. `updatedAt` is
//! omitted until the first status change.

use crate::domain::{Ticket, TicketId, TicketStatus, UserId};
use crate::error::{Result, StorageError};
use crate::storage::TicketStorage;
use chrono::{DateTime, Utc};
use mediareq_json::{DocumentStyle, read_document, write_document_atomic};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// On-disk form of a ticket. The id is the document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTicket {
    /// Requester identifier
    pub user_id: UserId,

    /// Requester display name
    pub username: String,

    /// Requested title
    pub title: String,

    /// Current status
    pub status: TicketStatus,

    /// Submission time
    pub requested_at: DateTime<Utc>,

    /// Last status change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredTicket {
    fn from_ticket(ticket: Ticket) -> (TicketId, Self) {
        (
            ticket.id,
            Self {
                user_id: ticket.requester_id,
                username: ticket.requester_name,
                title: ticket.title,
                status: ticket.status,
                requested_at: ticket.requested_at,
                updated_at: ticket.updated_at,
            },
        )
    }

    fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            requester_id: self.user_id,
            requester_name: self.username,
            title: self.title,
            status: self.status,
            requested_at: self.requested_at,
            updated_at: self.updated_at,
        }
    }
}

/// The whole request file: ordered `(id, ticket)` entries.
///
/// Serializes as a JSON object in entry order. Deserializing rejects a
/// document that repeats a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDocument {
    entries: Vec<(TicketId, StoredTicket)>,
}

impl TicketDocument {
    /// Build a document from tickets, keeping their order.
    #[must_use]
    pub fn from_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            entries: tickets.into_iter().map(StoredTicket::from_ticket).collect(),
        }
    }

    /// Convert back into tickets, in document order.
    #[must_use]
    pub fn into_tickets(self) -> Vec<Ticket> {
        self.entries
            .into_iter()
            .map(|(id, stored)| stored.into_ticket(id))
            .collect()
    }

    /// Number of tickets in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TicketDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, ticket) in &self.entries {
            map.serialize_entry(id, ticket)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TicketDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = TicketDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping request ids to requests")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                let mut seen = HashSet::new();
                while let Some((id, ticket)) = access.next_entry::<TicketId, StoredTicket>()? {
                    if !seen.insert(id.clone()) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate request id {id}"
                        )));
                    }
                    entries.push((id, ticket));
                }
                Ok(TicketDocument { entries })
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Read the request file.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns `StorageError::Load` if the file cannot be read or is not a valid
/// request document (bad JSON, bad id, unknown status, repeated id).
pub async fn load_from_json(path: &Path) -> Result<Option<Vec<Ticket>>> {
    let document: Option<TicketDocument> =
        read_document(path)
            .await
            .map_err(|source| StorageError::Load {
                path: path.to_path_buf(),
                source,
            })?;

    Ok(document.map(|doc| {
        debug!(path = %path.display(), count = doc.len(), "Read request document");
        doc.into_tickets()
    }))
}

/// Write every ticket in `storage` to the request file, atomically.
///
/// # Errors
///
/// Returns `StorageError::Persist` if the document cannot be written. The
/// previous file, if any, is left intact.
pub async fn save_to_json(
    storage: &dyn TicketStorage,
    path: &Path,
    style: DocumentStyle,
) -> Result<()> {
    let document = TicketDocument::from_tickets(storage.export_all().await?);

    write_document_atomic(path, &document, style)
        .await
        .map_err(|source| StorageError::Persist {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), count = document.len(), "Saved request document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "5678": {
            "userId": "43",
            "username": "bob",
            "title": "Arrival",
            "status": "in progress",
            "requestedAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T08:30:00.000Z"
        },
        "1234": {
            "userId": "42",
            "username": "alice",
            "title": "Dune",
            "status": "pending",
            "requestedAt": "2024-05-01T09:00:00.000Z"
        }
    }"#;

    #[test]
    fn document_keeps_file_order() {
        let doc: TicketDocument = serde_json::from_str(LEGACY).unwrap();
        let tickets = doc.into_tickets();

        assert_eq!(tickets[0].id.as_str(), "5678");
        assert_eq!(tickets[1].id.as_str(), "1234");
        assert_eq!(tickets[0].status, TicketStatus::InProgress);
        assert!(tickets[1].updated_at.is_none());
    }

    #[test]
    fn document_serializes_in_entry_order() {
        let doc: TicketDocument = serde_json::from_str(LEGACY).unwrap();
        let json = serde_json::to_string(&doc).unwrap();

        let first = json.find("\"5678\"").unwrap();
        let second = json.find("\"1234\"").unwrap();
        assert!(first < second);
        assert!(json.contains("\"in_progress\""));
        assert_eq!(json.matches("updatedAt").count(), 1);
    }

    #[test]
    fn document_rejects_duplicate_ids() {
        let json = r#"{
            "1234": {"userId": "1", "username": "a", "title": "A", "status": "pending", "requestedAt": "2024-05-01T09:00:00Z"},
            "1234": {"userId": "2", "username": "b", "title": "B", "status": "pending", "requestedAt": "2024-05-01T09:00:00Z"}
        }"#;

        let err = serde_json::from_str::<TicketDocument>(json).unwrap_err();

        assert!(err.to_string().contains("duplicate request id 1234"));
    }

    #[test]
    fn document_rejects_bad_keys_and_statuses() {
        let bad_key = r#"{"12": {"userId": "1", "username": "a", "title": "A", "status": "pending", "requestedAt": "2024-05-01T09:00:00Z"}}"#;
        let bad_status = r#"{"1234": {"userId": "1", "username": "a", "title": "A", "status": "lost", "requestedAt": "2024-05-01T09:00:00Z"}}"#;

        assert!(serde_json::from_str::<TicketDocument>(bad_key).is_err());
        assert!(serde_json::from_str::<TicketDocument>(bad_status).is_err());
    }

    #[test]
    fn empty_object_is_empty_document() {
        let doc: TicketDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }
}
