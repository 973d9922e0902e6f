//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::TicketStatus;

/// Any request status, for filtering and clearing
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatusArg {
    /// Submitted, not yet looked at
    Pending,
    /// Being worked on
    #[value(name = "in_progress", alias = "in-progress", alias = "in progress")]
    InProgress,
    /// Available
    Fulfilled,
    /// Will not be fulfilled
    Rejected,
    /// Postponed
    Delayed,
}

impl std::fmt::Display for TicketStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", TicketStatus::from(*self))
    }
}

impl From<TicketStatusArg> for TicketStatus {
    fn from(arg: TicketStatusArg) -> Self {
        match arg {
            TicketStatusArg::Pending => TicketStatus::Pending,
            TicketStatusArg::InProgress => TicketStatus::InProgress,
            TicketStatusArg::Fulfilled => TicketStatus::Fulfilled,
            TicketStatusArg::Rejected => TicketStatus::Rejected,
            TicketStatusArg::Delayed => TicketStatus::Delayed,
        }
    }
}

/// A status a request can be moved to (everything but pending)
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewStatusArg {
    /// Being worked on
    #[value(name = "in_progress", alias = "in-progress", alias = "in progress")]
    InProgress,
    /// Available
    Fulfilled,
    /// Will not be fulfilled
    Rejected,
    /// Postponed
    Delayed,
}

impl std::fmt::Display for NewStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", TicketStatus::from(*self))
    }
}

impl From<NewStatusArg> for TicketStatus {
    fn from(arg: NewStatusArg) -> Self {
        match arg {
            NewStatusArg::InProgress => TicketStatus::InProgress,
            NewStatusArg::Fulfilled => TicketStatus::Fulfilled,
            NewStatusArg::Rejected => TicketStatus::Rejected,
            NewStatusArg::Delayed => TicketStatus::Delayed,
        }
    }
}
