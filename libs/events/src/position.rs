//! Positions in the event log.

use serde::{Deserialize, Serialize};

use crate::Event;

/// A position in the totally ordered event log.
///
/// The store assigns strictly increasing sequence numbers starting at 1, so
/// [`LogPosition::BEFORE_ALL`] (-1) orders before every stored event. A
/// snapshot taken at position `p` is equivalent to folding the log prefix
/// `[0, p]` from the projection's zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogPosition(i64);

impl LogPosition {
    /// The position before the first event; replaying from here replays the
    /// entire log.
    pub const BEFORE_ALL: LogPosition = LogPosition(-1);

    /// Creates a position from a raw sequence number.
    #[must_use]
    pub const fn new(seq: i64) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if this position precedes the entire log.
    #[must_use]
    pub fn is_before_all(self) -> bool {
        self < Self::new(0)
    }
}

impl std::fmt::Display for LogPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event together with the sequence number the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub seq: LogPosition,
    pub event: Event,
}
