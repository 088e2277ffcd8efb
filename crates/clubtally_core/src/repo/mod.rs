//! Storage adapter: repository contracts and persistence implementations.
//!
//! # Responsibility
//! - Persist whole roster collections under versioned keys.
//! - Isolate SQLite and JSON encoding details from the roster service.
//!
//! # Invariants
//! - Every save rewrites the whole collection; there is no delta persistence.
//! - Members and events are stored independently, with no shared transaction.
//! - Transport failures surface as `RepoError`; only undecodable payloads fall
//!   back to defaults.

pub mod kv_store;
pub mod roster_repo;
