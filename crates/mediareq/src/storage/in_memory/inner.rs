//! Core in-memory data structures.
//!
//! [`TicketStoreInner`] is not thread-safe on its own; it is wrapped in
//! `Arc<Mutex<>>` by the parent module.

use crate::domain::{Ticket, TicketId};
use crate::error::{Error, Result, StorageError};
use crate::id_generation::{IdGenerationError, IdGenerator};
use std::collections::{HashMap, HashSet};

/// Ticket mapping plus its insertion order.
///
/// Every id in `order` has an entry in `tickets` and vice versa.
pub(crate) struct TicketStoreInner {
    /// Tickets indexed by id
    pub(super) tickets: HashMap<TicketId, Ticket>,

    /// Ids in insertion order
    pub(super) order: Vec<TicketId>,

    /// Source of new ids
    id_generator: IdGenerator,
}

impl TicketStoreInner {
    /// Create an empty store
    pub(crate) fn new(id_generator: IdGenerator) -> Self {
        Self {
            tickets: HashMap::new(),
            order: Vec::new(),
            id_generator,
        }
    }

    /// Generate an id not yet used by any ticket.
    pub(super) fn generate_id(&mut self) -> Result<TicketId> {
        let tickets = &self.tickets;
        self.id_generator
            .generate(|id| tickets.contains_key(id), tickets.len())
            .map_err(|e| match e {
                IdGenerationError::Exhausted { capacity } => Error::IdSpaceExhausted { capacity },
            })
    }

    /// Append a ticket at the end of the insertion order.
    pub(super) fn insert(&mut self, ticket: Ticket) {
        self.order.push(ticket.id.clone());
        self.tickets.insert(ticket.id.clone(), ticket);
    }

    /// Tickets in insertion order.
    pub(super) fn iter_ordered(&self) -> impl Iterator<Item = &Ticket> {
        self.order.iter().filter_map(|id| self.tickets.get(id))
    }

    /// Replace all tickets, keeping the given order.
    ///
    /// Fails without touching the current state if an id repeats.
    pub(super) fn replace_all(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        let mut seen = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if !seen.insert(&ticket.id) {
                return Err(StorageError::InvalidData(format!(
                    "duplicate request id {}",
                    ticket.id
                ))
                .into());
            }
        }

        self.tickets.clear();
        self.order.clear();
        for ticket in tickets {
            self.insert(ticket);
        }
        Ok(())
    }
}
