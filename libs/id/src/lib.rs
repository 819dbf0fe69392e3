//! # userd-id
//!
//! Stable ID types, parsing, and validation for the userd service.
//!
//! ## Design Principles
//!
//! - IDs are stable and system-generated; display names are user-controlled labels
//! - All IDs have a canonical string representation with strict parsing
//! - IDs support roundtrip serialization (parse → format → parse)
//! - IDs are typed so a user ID cannot be confused with another resource's ID
//!
//! ## ID Format
//!
//! IDs use a prefixed format: `{prefix}_{ulid}`, e.g.
//! `usr_01HV4Z2WQXKJNM8GPQY6VBKC3D`. The prefix gives type safety and
//! readability; the ULID gives time-ordering and uniqueness.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
