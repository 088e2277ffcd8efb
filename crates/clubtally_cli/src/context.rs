//! Roster access helpers shared by commands.

use clubtally_core::db::open_db;
use clubtally_core::{Event, EventId, Member, MemberId, RosterService, SqliteRosterRepository};
use std::path::Path;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub type Roster<'conn> = RosterService<SqliteRosterRepository<'conn>>;

/// Opens the roster at `db_path` and runs `f` against it.
///
/// On first run the seeded default events are saved so their ids stay
/// valid for later invocations.
pub fn with_roster<T>(
    db_path: &Path,
    f: impl FnOnce(&mut Roster<'_>) -> CliResult<T>,
) -> CliResult<T> {
    let conn = open_db(db_path)?;
    let repo = SqliteRosterRepository::try_new(&conn)?;
    let first_run = !repo.has_stored_events()?;
    let mut service = RosterService::load(repo)?;
    if first_run {
        service.persist_events()?;
    }
    f(&mut service)
}

/// Resolves a member by full id or unique id prefix.
pub fn resolve_member(roster: &Roster<'_>, raw: &str) -> CliResult<MemberId> {
    let ids = roster.members().iter().map(|m: &Member| m.id);
    resolve_id("member", ids, raw)
}

/// Resolves an event by full id or unique id prefix.
pub fn resolve_event(roster: &Roster<'_>, raw: &str) -> CliResult<EventId> {
    let ids = roster.events().iter().map(|e: &Event| e.id);
    resolve_id("event", ids, raw)
}

fn resolve_id(
    kind: &str,
    ids: impl Iterator<Item = uuid::Uuid>,
    raw: &str,
) -> CliResult<uuid::Uuid> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(format!("{kind} id must not be empty").into());
    }
    let matches = ids
        .filter(|id| id.to_string().starts_with(&needle))
        .collect::<Vec<_>>();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("no {kind} matches `{raw}`").into()),
        _ => Err(format!(
            "{kind} id prefix `{raw}` is ambiguous ({} matches)",
            matches.len()
        )
        .into()),
    }
}
