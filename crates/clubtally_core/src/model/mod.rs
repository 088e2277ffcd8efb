//! Roster domain model.
//!
//! # Responsibility
//! - Define the canonical records for members, events and point awards.
//! - Own the invariants every persisted record must satisfy.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - `Member::points` always equals the sum of its history entries.
//! - A `PointLog` copies event name/points; it never references an `Event`.

pub mod event;
pub mod member;
