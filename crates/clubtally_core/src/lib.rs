//! Core domain logic for Club Tally.
//! This crate is the single source of truth for roster invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::RuntimeConfig;
pub use export::ranking_csv::{render_ranking_csv, write_ranking_file, ExportError, HeaderStyle};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{
    default_events, Event, EventId, EventValidationError, DEFAULT_GLYPH, GLYPH_PALETTE,
};
pub use model::member::{Member, MemberId, MemberValidationError, PointLog, PointLogId};
pub use repo::kv_store::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use repo::roster_repo::{
    KvRosterRepository, RosterRepository, SqliteRosterRepository, EVENTS_KEY, MEMBERS_KEY,
};
pub use service::ranking::{rank_medal, RankedEntry, RankedMembers};
pub use service::roster_service::{RosterError, RosterResult, RosterService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
