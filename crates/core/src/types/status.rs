//! Order status and the forward-only transition machine.
//!
//! An order moves through a fixed sequence of states:
//!
//! ```text
//! pending -> in process -> sent -> delivered
//! ```
//!
//! Each step is performed by a dedicated backend action; there is no
//! generic "set status" endpoint. [`OrderStatus::next_action`] is a total
//! function over the enum, so adding a status without deciding its
//! transition is a compile error rather than a silently-ignored case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of an order, using the backend's wire spellings.
///
/// Note the space in `"in process"` - the backend serializes it that way,
/// which rules out a blanket `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Placed by a customer, not yet confirmed by the owner.
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// Confirmed; the restaurant is preparing it.
    #[serde(rename = "in process")]
    InProcess,
    /// Handed to delivery.
    #[serde(rename = "sent")]
    Sent,
    /// Received by the customer. Terminal.
    #[serde(rename = "delivered")]
    Delivered,
}

/// The single backend action that advances an order by exactly one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionAction {
    /// `pending` -> `in process`
    Confirm,
    /// `in process` -> `sent`
    Send,
    /// `sent` -> `delivered`
    Deliver,
}

/// Attempted to advance an order that is already delivered.
///
/// This is a logic error in the calling layer, not a retryable condition:
/// callers are expected to check [`OrderStatus::is_terminal`] first, and
/// the machine fails loudly rather than returning the last valid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order is already delivered; no further status transition exists")]
pub struct TerminalStateError;

impl TransitionAction {
    /// Path segment of the transition endpoint (`orders/{id}/<segment>`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Send => "send",
            Self::Deliver => "deliver",
        }
    }

    /// The status an order holds after this action succeeds.
    #[must_use]
    pub const fn resulting_status(self) -> OrderStatus {
        match self {
            Self::Confirm => OrderStatus::InProcess,
            Self::Send => OrderStatus::Sent,
            Self::Deliver => OrderStatus::Delivered,
        }
    }
}

impl OrderStatus {
    /// The action that advances an order in this status by one step.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalStateError`] for [`OrderStatus::Delivered`]:
    /// the sequence is finite and never wraps or repeats.
    pub const fn next_action(self) -> Result<TransitionAction, TerminalStateError> {
        match self {
            Self::Pending => Ok(TransitionAction::Confirm),
            Self::InProcess => Ok(TransitionAction::Send),
            Self::Sent => Ok(TransitionAction::Deliver),
            Self::Delivered => Err(TerminalStateError),
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Backend wire spelling of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProcess => "in process",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in process" => Ok(Self::InProcess),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
