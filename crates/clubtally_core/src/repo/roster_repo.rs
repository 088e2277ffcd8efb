//! Roster repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Load/save the member and event collections under versioned keys.
//! - Apply first-run defaults: no members, the four seed events.
//!
//! # Invariants
//! - Absent or undecodable collections fall back to defaults; store
//!   transport errors are returned unchanged.
//! - Changing a record shape requires bumping its key version.

use crate::model::event::{default_events, Event};
use crate::model::member::Member;
use crate::repo::kv_store::{
    load_collection, save_collection, KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
use log::warn;
use rusqlite::Connection;

/// Storage key for the member collection.
pub const MEMBERS_KEY: &str = "members_v1";
/// Storage key for the event collection.
pub const EVENTS_KEY: &str = "events_v1";

/// Repository interface for the two roster collections.
pub trait RosterRepository {
    /// Loads all members in insertion order; empty on first run.
    fn load_members(&self) -> RepoResult<Vec<Member>>;
    /// Replaces the persisted member collection.
    fn save_members(&self, members: &[Member]) -> RepoResult<()>;
    /// Loads all events; the seed defaults on first run.
    fn load_events(&self) -> RepoResult<Vec<Event>>;
    /// Replaces the persisted event collection.
    fn save_events(&self, events: &[Event]) -> RepoResult<()>;
}

/// Roster repository layered over any [`KeyValueStore`].
pub struct KvRosterRepository<S: KeyValueStore> {
    store: S,
}

/// SQLite-backed roster repository.
pub type SqliteRosterRepository<'conn> = KvRosterRepository<SqliteKeyValueStore<'conn>>;

impl<S: KeyValueStore> KvRosterRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether an event collection has been saved under [`EVENTS_KEY`].
    pub fn has_stored_events(&self) -> RepoResult<bool> {
        Ok(self.store.get(EVENTS_KEY)?.is_some())
    }

    fn load_or_fallback<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> RepoResult<Vec<T>> {
        match load_collection::<T>(&self.store, key) {
            Ok(Some(items)) => Ok(items),
            Ok(None) => Ok(fallback()),
            Err(RepoError::InvalidData(message)) => {
                warn!(
                    "event=collection_load module=repo status=fallback key={} reason={}",
                    key, message
                );
                Ok(fallback())
            }
            Err(err) => Err(err),
        }
    }
}

impl<'conn> KvRosterRepository<SqliteKeyValueStore<'conn>> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(SqliteKeyValueStore::try_new(conn)?))
    }
}

impl<S: KeyValueStore> RosterRepository for KvRosterRepository<S> {
    fn load_members(&self) -> RepoResult<Vec<Member>> {
        self.load_or_fallback(MEMBERS_KEY, Vec::new)
    }

    fn save_members(&self, members: &[Member]) -> RepoResult<()> {
        save_collection(&self.store, MEMBERS_KEY, members)
    }

    fn load_events(&self) -> RepoResult<Vec<Event>> {
        self.load_or_fallback(EVENTS_KEY, default_events)
    }

    fn save_events(&self, events: &[Event]) -> RepoResult<()> {
        save_collection(&self.store, EVENTS_KEY, events)
    }
}
