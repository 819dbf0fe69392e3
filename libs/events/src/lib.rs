//! # userd-events
//!
//! Event type definitions and serialization for the userd service.
//!
//! ## Design Principles
//!
//! - Events are immutable facts; they are appended, never updated or deleted
//! - The catalog is closed: every event kind is a variant of [`Event`], and
//!   adding a kind means adding a match arm, not configuration
//! - Each variant carries an explicit, statically declared tag (the stored
//!   `event_name`); tags are never derived from runtime type information
//! - Encoding is lossless: `Event::decode(e.kind(), &e.encode()?)` yields `e`
//!
//! ## Log positions
//!
//! Stored events are keyed by a strictly increasing sequence number assigned
//! by the event store at append time. [`LogPosition`] wraps that sequence,
//! with [`LogPosition::BEFORE_ALL`] denoting "before the first event" so that
//! replays and snapshots share one position type.

mod catalog;
mod error;
mod position;
mod types;

pub use catalog::{event_kinds, Event};
pub use error::EventError;
pub use position::{LogPosition, RecordedEvent};
pub use types::*;
