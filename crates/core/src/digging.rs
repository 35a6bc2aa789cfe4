//! Client-reported digging phases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phase of a dig action as reported by the client.
///
/// The server keeps no per-user dig state; callers are responsible for
/// sequencing `Started → InProgress* → Stopped | Broken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiggingStatus {
    /// First hit on a cell.
    Started,
    /// Repeated hits while holding the button.
    InProgress,
    /// Player let go before the block broke.
    Stopped,
    /// Block finished breaking.
    Broken,
}

/// Error returned when a wire code names no digging status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown digging status {0}")]
pub struct DiggingStatusError(pub u8);

impl DiggingStatus {
    /// Decode the status code sent by clients.
    pub fn from_wire(code: u8) -> Result<Self, DiggingStatusError> {
        match code {
            0 => Ok(DiggingStatus::Started),
            1 => Ok(DiggingStatus::InProgress),
            2 => Ok(DiggingStatus::Stopped),
            3 => Ok(DiggingStatus::Broken),
            other => Err(DiggingStatusError(other)),
        }
    }

    /// Encode as the client status code.
    pub const fn to_wire(self) -> u8 {
        match self {
            DiggingStatus::Started => 0,
            DiggingStatus::InProgress => 1,
            DiggingStatus::Stopped => 2,
            DiggingStatus::Broken => 3,
        }
    }

    /// True once the attempt can receive no further events.
    pub const fn is_terminal(self) -> bool {
        matches!(self, DiggingStatus::Stopped | DiggingStatus::Broken)
    }
}
