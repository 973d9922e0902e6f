//! TicketStorage trait implementation for in-memory storage.

use super::InMemoryStorage;
use crate::domain::{NewTicket, Ticket, TicketId, TicketStatus};
use crate::error::{Error, Result};
use crate::storage::TicketStorage;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl TicketStorage for InMemoryStorage {
    async fn create(&mut self, new_ticket: NewTicket) -> Result<Ticket> {
        new_ticket.validate()?;

        let mut inner = self.lock().await;
        let id = inner.generate_id()?;

        let ticket = Ticket {
            id,
            requester_id: new_ticket.requester_id,
            requester_name: new_ticket.requester_name,
            title: new_ticket.title,
            status: TicketStatus::Pending,
            requested_at: Utc::now(),
            updated_at: None,
        };

        debug!(id = %ticket.id, requester = %ticket.requester_id, "Created request");
        inner.insert(ticket.clone());
        Ok(ticket)
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>> {
        let inner = self.lock().await;
        Ok(inner.tickets.get(id).cloned())
    }

    async fn set_status(&mut self, id: &TicketId, status: TicketStatus) -> Result<Ticket> {
        let mut inner = self.lock().await;

        let ticket = inner
            .tickets
            .get_mut(id)
            .ok_or_else(|| Error::TicketNotFound(id.clone()))?;

        if !status.is_assignable() {
            return Err(Error::InvalidStatus(status));
        }

        let previous = ticket.status;
        ticket.status = status;
        ticket.updated_at = Some(Utc::now());

        debug!(%id, from = %previous, to = %status, "Updated request status");
        Ok(ticket.clone())
    }

    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        let inner = self.lock().await;
        Ok(inner
            .iter_ordered()
            .filter(|ticket| status.is_none_or(|s| ticket.status == s))
            .cloned()
            .collect())
    }

    async fn clear(&mut self, status: TicketStatus) -> Result<usize> {
        let mut inner = self.lock().await;
        let inner = &mut *inner;

        let before = inner.order.len();
        let tickets = &mut inner.tickets;
        inner.order.retain(|id| {
            let keep = tickets.get(id).is_some_and(|t| t.status != status);
            if !keep {
                tickets.remove(id);
            }
            keep
        });
        let removed = before - inner.order.len();

        debug!(%status, removed, "Cleared requests");
        Ok(removed)
    }

    async fn import_tickets(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        let mut inner = self.lock().await;
        inner.replace_all(tickets)
    }

    async fn export_all(&self) -> Result<Vec<Ticket>> {
        let inner = self.lock().await;
        Ok(inner.iter_ordered().cloned().collect())
    }

    async fn save(&self) -> Result<()> {
        // No-op for in-memory storage
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{NewTicket, TicketStatus};
    use crate::error::Error;
    use crate::id_generation::{IdGenerator, ScriptedIdSource};
    use crate::storage::TicketStorage;
    use crate::storage::in_memory::new_in_memory_storage;

    fn scripted(values: Vec<u16>) -> Box<dyn TicketStorage> {
        new_in_memory_storage(IdGenerator::new(Box::new(ScriptedIdSource::new(values))))
    }

    #[tokio::test]
    async fn create_starts_pending_without_update_time() {
        let mut storage = scripted(vec![4821]);

        let ticket = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        assert_eq!(ticket.id.as_str(), "4821");
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert!(ticket.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let mut storage = scripted(vec![4821]);

        let result = storage.create(NewTicket::new("42", "alice", "  ")).await;

        assert!(matches!(result, Err(Error::InvalidTitle(_))));
        assert!(storage.export_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_status_missing_is_checked_before_status() {
        let mut storage = scripted(vec![4821]);
        let missing = "1111".parse().unwrap();

        let result = storage.set_status(&missing, TicketStatus::Pending).await;

        assert!(matches!(result, Err(Error::TicketNotFound(_))));
    }

    #[tokio::test]
    async fn set_status_rejects_pending() {
        let mut storage = scripted(vec![4821]);
        let ticket = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();

        let result = storage.set_status(&ticket.id, TicketStatus::Pending).await;

        assert!(matches!(
            result,
            Err(Error::InvalidStatus(TicketStatus::Pending))
        ));
        let stored = storage.get(&ticket.id).await.unwrap().unwrap();
        assert!(stored.updated_at.is_none());
    }

    #[tokio::test]
    async fn clear_keeps_order_of_survivors() {
        let mut storage = scripted(vec![3000, 1000, 2000]);
        let a = storage.create(NewTicket::new("1", "a", "A")).await.unwrap();
        let b = storage.create(NewTicket::new("2", "b", "B")).await.unwrap();
        let c = storage.create(NewTicket::new("3", "c", "C")).await.unwrap();
        storage
            .set_status(&b.id, TicketStatus::Rejected)
            .await
            .unwrap();

        assert_eq!(storage.clear(TicketStatus::Rejected).await.unwrap(), 1);

        let ids: Vec<_> = storage
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn import_rejects_duplicate_ids_and_keeps_state() {
        let mut storage = scripted(vec![4821, 5000]);
        let existing = storage
            .create(NewTicket::new("42", "alice", "Dune"))
            .await
            .unwrap();
        let mut dup = existing.clone();
        dup.title = "Other".to_string();

        let result = storage.import_tickets(vec![existing.clone(), dup]).await;

        assert!(result.is_err());
        assert_eq!(storage.export_all().await.unwrap(), vec![existing]);
    }
}
