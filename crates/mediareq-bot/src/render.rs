//! Chat message rendering.
//!
//! Messages use the chat platform's Markdown subset (`**bold**`,
//! `` `code` ``) and the shared status icons.

use mediareq::domain::{Ticket, TicketStatus};
use mediareq::output::status_icon;

/// Reply to the requester after a successful submission.
#[must_use]
pub fn submitted(ticket: &Ticket) -> String {
    format!(
        "Your request for **{}** has been submitted! (ID: {})",
        ticket.title, ticket.id
    )
}

/// Direct message to the administrator about a new request.
#[must_use]
pub fn admin_notice(ticket: &Ticket) -> String {
    format!(
        "New request from {}:\n• Title: **{}**\n• Request ID: `{}`",
        ticket.requester_name, ticket.title, ticket.id
    )
}

/// Reply to the administrator after a status change.
#[must_use]
pub fn status_updated(ticket: &Ticket) -> String {
    format!(
        "Request {} status updated to {}.",
        ticket.id,
        ticket.status.label()
    )
}

/// Direct message to the requester about a status change.
#[must_use]
pub fn requester_notice(ticket: &Ticket) -> String {
    format!(
        "Status update for your request **{}**: {} {}",
        ticket.title,
        status_icon(ticket.status),
        ticket.status.label()
    )
}

/// One line per ticket under a bold header.
#[must_use]
pub fn ticket_list(tickets: &[Ticket], filter: Option<TicketStatus>) -> String {
    if tickets.is_empty() {
        return match filter {
            Some(status) => format!("No requests with status: {}", status.label()),
            None => "No requests found".to_string(),
        };
    }

    let header = match filter {
        Some(status) => format!("**Requests ({}):**", status.label()),
        None => "**Requests:**".to_string(),
    };
    let lines: Vec<String> = tickets
        .iter()
        .map(|ticket| {
            format!(
                "{} `{}` **{}** (by {})",
                status_icon(ticket.status),
                ticket.id,
                ticket.title,
                ticket.requester_name
            )
        })
        .collect();
    format!("{header}\n{}", lines.join("\n"))
}

/// Reply after clearing requests.
#[must_use]
pub fn cleared(count: usize, status: TicketStatus) -> String {
    let noun = if count == 1 { "request" } else { "requests" };
    format!(
        "Cleared {count} {noun} with status \"{}\".",
        status.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mediareq::domain::{TicketId, UserId};
    use rstest::rstest;

    fn ticket(id: u16, title: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: TicketId::from_number(id).unwrap(),
            requester_id: UserId::new("42"),
            requester_name: "alice".to_string(),
            title: title.to_string(),
            status,
            requested_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn submitted_message() {
        assert_eq!(
            submitted(&ticket(4821, "Dune", TicketStatus::Pending)),
            "Your request for **Dune** has been submitted! (ID: 4821)"
        );
    }

    #[test]
    fn admin_notice_message() {
        assert_eq!(
            admin_notice(&ticket(4821, "Dune", TicketStatus::Pending)),
            "New request from alice:\n• Title: **Dune**\n• Request ID: `4821`"
        );
    }

    #[rstest]
    #[case(TicketStatus::InProgress, "🔄 in progress")]
    #[case(TicketStatus::Fulfilled, "✅ fulfilled")]
    #[case(TicketStatus::Rejected, "❌ rejected")]
    #[case(TicketStatus::Delayed, "⏰ delayed")]
    fn requester_notice_uses_icon(#[case] status: TicketStatus, #[case] suffix: &str) {
        let message = requester_notice(&ticket(4821, "Dune", status));
        assert_eq!(
            message,
            format!("Status update for your request **Dune**: {suffix}")
        );
    }

    #[test]
    fn status_updated_message() {
        assert_eq!(
            status_updated(&ticket(4821, "Dune", TicketStatus::InProgress)),
            "Request 4821 status updated to in progress."
        );
    }

    #[test]
    fn list_with_and_without_filter() {
        let tickets = vec![
            ticket(4821, "Dune", TicketStatus::Pending),
            ticket(1234, "Heat", TicketStatus::Pending),
        ];

        assert_eq!(
            ticket_list(&tickets, None),
            "**Requests:**\n⏳ `4821` **Dune** (by alice)\n⏳ `1234` **Heat** (by alice)"
        );
        assert!(ticket_list(&tickets, Some(TicketStatus::Pending)).starts_with("**Requests (pending):**\n"));
    }

    #[test]
    fn empty_list_messages() {
        assert_eq!(ticket_list(&[], None), "No requests found");
        assert_eq!(
            ticket_list(&[], Some(TicketStatus::Delayed)),
            "No requests with status: delayed"
        );
    }

    #[rstest]
    #[case(0, "Cleared 0 requests with status \"fulfilled\".")]
    #[case(1, "Cleared 1 request with status \"fulfilled\".")]
    #[case(3, "Cleared 3 requests with status \"fulfilled\".")]
    fn cleared_pluralizes(#[case] count: usize, #[case] expected: &str) {
        assert_eq!(cleared(count, TicketStatus::Fulfilled), expected);
    }
}
