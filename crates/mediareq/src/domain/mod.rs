//! Domain types for media request tickets.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest ticket id.
pub const MIN_TICKET_ID: u16 = 1000;

/// Largest ticket id.
pub const MAX_TICKET_ID: u16 = 9999;

/// Number of distinct ticket ids.
pub const TICKET_ID_SPACE: usize = (MAX_TICKET_ID - MIN_TICKET_ID) as usize + 1;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Unique identifier for a ticket: a 4-digit number in 1000-9999 kept in
/// its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Build an id from its numeric value.
    ///
    /// Returns `None` when `n` is outside 1000-9999.
    #[must_use]
    pub fn from_number(n: u16) -> Option<Self> {
        (MIN_TICKET_ID..=MAX_TICKET_ID)
            .contains(&n)
            .then(|| Self(n.to_string()))
    }

    /// Parse a user-supplied id. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTicketId`] unless the input is exactly four
    /// ASCII digits in 1000-9999.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidTicketId(s.to_string()));
        }
        trimmed
            .parse::<u16>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| Error::InvalidTicketId(s.to_string()))
    }

    /// Get the string representation of the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TicketId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TicketId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

/// Opaque chat-platform user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle status of a ticket.
///
/// New tickets are always `Pending`. Status updates may move a ticket
/// between any of the other four values but never back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Submitted, not yet looked at
    Pending,

    /// Being worked on
    #[serde(alias = "in progress", alias = "in-progress")]
    InProgress,

    /// Available
    Fulfilled,

    /// Will not be fulfilled
    Rejected,

    /// Postponed
    Delayed,
}

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::Pending,
        TicketStatus::InProgress,
        TicketStatus::Fulfilled,
        TicketStatus::Rejected,
        TicketStatus::Delayed,
    ];

    /// Machine name used in storage and command options.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
            Self::Delayed => "delayed",
        }
    }

    /// Human-readable name for messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            other => other.as_str(),
        }
    }

    /// Whether a status update may set this value.
    #[must_use]
    pub fn is_assignable(self) -> bool {
        self != Self::Pending
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    /// Accepts the machine name plus the `in progress` and `in-progress`
    /// spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in progress" | "in-progress" => Ok(Self::InProgress),
            "fulfilled" => Ok(Self::Fulfilled),
            "rejected" => Ok(Self::Rejected),
            "delayed" => Ok(Self::Delayed),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}

/// A media request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Who asked for it
    pub requester_id: UserId,

    /// Requester display name at submission time
    pub requester_name: String,

    /// Requested movie or show
    pub title: String,

    /// Current status
    pub status: TicketStatus,

    /// Submission time
    pub requested_at: DateTime<Utc>,

    /// Time of the last status change, `None` until the first one
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data for submitting a new ticket
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Who is asking
    pub requester_id: UserId,

    /// Requester display name
    pub requester_name: String,

    /// Requested movie or show
    pub title: String,
}

impl NewTicket {
    /// Create a submission.
    pub fn new(
        requester_id: impl Into<UserId>,
        requester_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            requester_id: requester_id.into(),
            requester_name: requester_name.into(),
            title: title.into(),
        }
    }

    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTitle`] when the title is blank or longer than
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidTitle("title cannot be empty".to_string()));
        }
        let length = self.title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(Error::InvalidTitle(format!(
                "title cannot exceed {MAX_TITLE_LENGTH} characters (got {length})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lower_bound("1000")]
    #[case::upper_bound("9999")]
    #[case::padded(" 4821 ")]
    fn ticket_id_parse_valid(#[case] input: &str) {
        let id = TicketId::parse(input).unwrap();
        assert_eq!(id.as_str(), input.trim());
    }

    #[rstest]
    #[case::too_small("0999")]
    #[case::three_digits("999")]
    #[case::five_digits("10000")]
    #[case::letters("12a4")]
    #[case::signed("+123")]
    #[case::empty("")]
    fn ticket_id_parse_invalid(#[case] input: &str) {
        assert!(matches!(
            TicketId::parse(input),
            Err(Error::InvalidTicketId(_))
        ));
    }

    #[test]
    fn ticket_id_from_number_bounds() {
        assert!(TicketId::from_number(999).is_none());
        assert!(TicketId::from_number(10_000).is_none());
        assert_eq!(TicketId::from_number(1000).unwrap().as_str(), "1000");
    }

    #[test]
    fn ticket_id_space_size() {
        assert_eq!(TICKET_ID_SPACE, 9000);
    }

    #[test]
    fn ticket_id_deserialize_rejects_bad_format() {
        let result: Result<TicketId, _> = serde_json::from_str("\"12\"");
        assert!(result.is_err());
    }

    #[rstest]
    #[case("pending", TicketStatus::Pending)]
    #[case("in_progress", TicketStatus::InProgress)]
    #[case("in progress", TicketStatus::InProgress)]
    #[case("In-Progress", TicketStatus::InProgress)]
    #[case("FULFILLED", TicketStatus::Fulfilled)]
    #[case("rejected", TicketStatus::Rejected)]
    #[case(" delayed ", TicketStatus::Delayed)]
    fn status_from_str(#[case] input: &str, #[case] expected: TicketStatus) {
        assert_eq!(input.parse::<TicketStatus>().unwrap(), expected);
    }

    #[test]
    fn status_from_str_unknown() {
        assert!(matches!(
            "done".parse::<TicketStatus>(),
            Err(Error::UnknownStatus(_))
        ));
    }

    #[test]
    fn status_serde_accepts_legacy_spelling() {
        let status: TicketStatus = serde_json::from_str("\"in progress\"").unwrap();
        assert_eq!(status, TicketStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in_progress\"");
    }

    #[test]
    fn only_pending_is_not_assignable() {
        let assignable: Vec<_> = TicketStatus::ALL
            .into_iter()
            .filter(|s| s.is_assignable())
            .collect();
        assert_eq!(assignable.len(), 4);
        assert!(!TicketStatus::Pending.is_assignable());
    }

    #[test]
    fn status_label_uses_space() {
        assert_eq!(TicketStatus::InProgress.label(), "in progress");
        assert_eq!(TicketStatus::Rejected.label(), "rejected");
    }

    #[rstest]
    #[case::blank("   ".to_string())]
    #[case::too_long("x".repeat(MAX_TITLE_LENGTH + 1))]
    fn new_ticket_rejects_bad_title(#[case] title: String) {
        let ticket = NewTicket::new("42", "alice", title);
        assert!(matches!(ticket.validate(), Err(Error::InvalidTitle(_))));
    }

    #[test]
    fn new_ticket_accepts_max_length_title() {
        let ticket = NewTicket::new("42", "alice", "é".repeat(MAX_TITLE_LENGTH));
        assert!(ticket.validate().is_ok());
    }
}
