//! Key-value collection store and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/put of serialized payloads keyed by collection name.
//! - Encode and decode typed collections as JSON arrays.
//!
//! # Invariants
//! - `put` replaces the previous payload for a key atomically.
//! - Decoding never masks bad data: undecodable payloads are `InvalidData`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage adapter error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Collection could not be encoded to JSON.
    Encode(serde_json::Error),
    /// Persisted payload cannot be converted into valid records.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "roster store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "roster store requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw payload store keyed by collection name.
pub trait KeyValueStore {
    /// Returns the payload stored under `key`, if any.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the payload stored under `key`.
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// Rejects connections that did not go through `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Loads and decodes a whole collection.
///
/// Returns `Ok(None)` when `key` has never been written.
pub fn load_collection<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> RepoResult<Option<Vec<T>>> {
    let Some(payload) = store.get(key)? else {
        return Ok(None);
    };
    let items = serde_json::from_str::<Vec<T>>(&payload).map_err(|err| {
        RepoError::InvalidData(format!(
            "collection `{key}` failed to decode at line {} column {}",
            err.line(),
            err.column()
        ))
    })?;
    debug!(
        "event=collection_load module=repo status=ok key={} count={}",
        key,
        items.len()
    );
    Ok(Some(items))
}

/// Encodes and writes a whole collection, replacing the previous payload.
pub fn save_collection<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    items: &[T],
) -> RepoResult<()> {
    let payload = serde_json::to_string(items).map_err(RepoError::Encode)?;
    store.put(key, &payload)?;
    debug!(
        "event=collection_save module=repo status=ok key={} count={} bytes={}",
        key,
        items.len(),
        payload.len()
    );
    Ok(())
}

fn ensure_kv_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("kv_store"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_collection, save_collection, KeyValueStore, SqliteKeyValueStore};
    use crate::db::open_db_in_memory;
    use crate::repo::kv_store::RepoError;
    use rusqlite::Connection;

    #[test]
    fn put_replaces_previous_payload() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn load_collection_reports_undecodable_payload() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        store.put("numbers", "{not json").unwrap();

        let err = load_collection::<i64>(&store, "numbers").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();

        save_collection(&store, "numbers", &[3_i64, 1, 2]).unwrap();
        let loaded = load_collection::<i64>(&store, "numbers").unwrap();
        assert_eq!(loaded, Some(vec![3, 1, 2]));
    }

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
        assert!(matches!(
            err,
            RepoError::UninitializedConnection {
                actual_version: 0,
                ..
            }
        ));
    }
}
