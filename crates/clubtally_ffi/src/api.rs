//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roster use-cases to Dart via FRB as plain envelopes.
//! - Open the roster database per call; the core owns all invariants.
//! - Serialize calls within the process so read-modify-write cycles never
//!   interleave.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - IDs cross the boundary as canonical UUID strings.

use clubtally_core::db::open_db;
use clubtally_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, write_ranking_file,
    HeaderStyle, RosterService, RuntimeConfig, SqliteRosterRepository, GLYPH_PALETTE,
};
use log::warn;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();
// Saves rewrite whole collections; overlapping calls would drop each other's writes.
static ROSTER_LOCK: Mutex<()> = Mutex::new(());

/// Exposes core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking. Never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMemberItem {
    pub member_id: String,
    pub name: String,
    pub points: i64,
    /// 1-based rank.
    pub rank: u32,
    /// `🥇|🥈|🥉` for the top three, the rank number otherwise.
    pub badge: String,
}

/// Event card shown in the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub event_id: String,
    pub name: String,
    pub points: i64,
    pub glyph: String,
}

/// Full screen state for the main view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    pub ok: bool,
    pub members: Vec<RankedMemberItem>,
    pub events: Vec<EventItem>,
    /// Default selection (first event) when any exist.
    pub selected_event_id: Option<String>,
    pub glyph_palette: Vec<String>,
    pub message: String,
}

/// One history row, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub log_id: String,
    pub event_name: String,
    pub points: i64,
    pub created_at_ms: i64,
}

/// History sheet envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryResponse {
    pub ok: bool,
    pub member_name: Option<String>,
    pub points: i64,
    pub items: Vec<HistoryItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Created entity ID, or the export file path for `ranking_export`.
    pub value: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, value: Option<String>) -> Self {
        Self {
            ok: true,
            value,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            message: message.into(),
        }
    }
}

/// Loads the ranked members, events and glyph palette.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_snapshot() -> RosterSnapshot {
    let result = with_roster_service(|service| {
        let members = service
            .ranked_members()
            .iter()
            .map(|entry| RankedMemberItem {
                member_id: entry.member.id.to_string(),
                name: entry.member.name.clone(),
                points: entry.member.points,
                rank: u32::try_from(entry.rank).unwrap_or(u32::MAX),
                badge: entry.badge(),
            })
            .collect::<Vec<_>>();
        let events = service
            .events()
            .iter()
            .map(|event| EventItem {
                event_id: event.id.to_string(),
                name: event.name.clone(),
                points: event.points,
                glyph: event.glyph.clone(),
            })
            .collect::<Vec<_>>();
        let selected_event_id = service.selected_event().map(|event| event.id.to_string());
        Ok((members, events, selected_event_id))
    });

    let glyph_palette = GLYPH_PALETTE.iter().map(|glyph| glyph.to_string()).collect();
    match result {
        Ok((members, events, selected_event_id)) => RosterSnapshot {
            ok: true,
            message: format!("{} member(s), {} event(s).", members.len(), events.len()),
            members,
            events,
            selected_event_id,
            glyph_palette,
        },
        Err(err) => RosterSnapshot {
            ok: false,
            members: Vec::new(),
            events: Vec::new(),
            selected_event_id: None,
            glyph_palette,
            message: format!("roster_snapshot failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn member_add(name: String) -> ActionResponse {
    match with_roster_service(|service| service.add_member(&name).map_err(|e| e.to_string())) {
        Ok(id) => ActionResponse::success("Member added.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("member_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn member_delete(member_id: String) -> ActionResponse {
    let result = parse_id(&member_id).and_then(|id| {
        with_roster_service(|service| service.delete_member(id).map_err(|e| e.to_string()))
    });
    match result {
        Ok(true) => ActionResponse::success("Member deleted.", Some(member_id)),
        Ok(false) => ActionResponse::success("Member not found; nothing deleted.", None),
        Err(err) => ActionResponse::failure(format!("member_delete failed: {err}")),
    }
}

/// Adds an event from the add-event form.
///
/// `points_text` is the raw form text; non-integers are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn event_add(name: String, points_text: String, glyph: String) -> ActionResponse {
    let result = with_roster_service(|service| {
        service
            .add_event(&name, &points_text, &glyph)
            .map_err(|e| e.to_string())
    });
    match result {
        Ok(id) => ActionResponse::success("Event added.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("event_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(event_id: String) -> ActionResponse {
    let result = parse_id(&event_id).and_then(|id| {
        with_roster_service(|service| service.delete_event(id).map_err(|e| e.to_string()))
    });
    match result {
        Ok(true) => ActionResponse::success("Event deleted.", Some(event_id)),
        Ok(false) => ActionResponse::success("Event not found; nothing deleted.", None),
        Err(err) => ActionResponse::failure(format!("event_delete failed: {err}")),
    }
}

/// Awards an event to a member.
///
/// `event_id = None` awards the default selection (the first event); with no
/// events left this is rejected as "no event selected".
#[flutter_rust_bridge::frb(sync)]
pub fn point_award(member_id: String, event_id: Option<String>) -> ActionResponse {
    let result = parse_id(&member_id).and_then(|member| {
        let event = event_id.as_deref().map(parse_id).transpose()?;
        with_roster_service(|service| {
            let awarded = match event {
                Some(event) => service.award_point(member, event),
                None => service.award_point_to_selected(member),
            };
            awarded.map_err(|e| e.to_string())
        })
    });
    match result {
        Ok(Some(log)) => ActionResponse::success(
            format!("Awarded {} point(s).", log.points),
            Some(log.id.to_string()),
        ),
        Ok(None) => ActionResponse::success("Member not found; nothing awarded.", None),
        Err(err) => ActionResponse::failure(format!("point_award failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn member_history(member_id: String) -> HistoryResponse {
    let result = parse_id(&member_id).and_then(|id| {
        with_roster_service(|service| {
            Ok(service.member(id).map(|member| {
                let items = member
                    .history
                    .iter()
                    .map(|log| HistoryItem {
                        log_id: log.id.to_string(),
                        event_name: log.event_name.clone(),
                        points: log.points,
                        created_at_ms: log.created_at_ms,
                    })
                    .collect::<Vec<_>>();
                (member.name.clone(), member.points, items)
            }))
        })
    });
    match result {
        Ok(Some((name, points, items))) => HistoryResponse {
            ok: true,
            message: if items.is_empty() {
                "History is empty.".to_string()
            } else {
                format!("{} entr(ies).", items.len())
            },
            member_name: Some(name),
            points,
            items,
        },
        Ok(None) => HistoryResponse {
            ok: false,
            member_name: None,
            points: 0,
            items: Vec::new(),
            message: "member_history failed: member not found".to_string(),
        },
        Err(err) => HistoryResponse {
            ok: false,
            member_name: None,
            points: 0,
            items: Vec::new(),
            message: format!("member_history failed: {err}"),
        },
    }
}

/// Deletes history rows by their positions in the last fetched history.
#[flutter_rust_bridge::frb(sync)]
pub fn history_delete(member_id: String, indices: Vec<u32>) -> ActionResponse {
    let positions = indices
        .into_iter()
        .map(|index| index as usize)
        .collect::<Vec<_>>();
    let result = parse_id(&member_id).and_then(|id| {
        with_roster_service(|service| {
            service
                .delete_history_entries(id, &positions)
                .map_err(|e| e.to_string())
        })
    });
    match result {
        Ok(Some(points)) => ActionResponse::success(
            format!("History updated; total is now {points}."),
            Some(member_id),
        ),
        Ok(None) => ActionResponse::success("Member not found; nothing deleted.", None),
        Err(err) => ActionResponse::failure(format!("history_delete failed: {err}")),
    }
}

/// Clears every member's points and history.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_reset() -> ActionResponse {
    match with_roster_service(|service| service.reset_all().map_err(|e| e.to_string())) {
        Ok(()) => ActionResponse::success("All points reset.", None),
        Err(err) => ActionResponse::failure(format!("roster_reset failed: {err}")),
    }
}

/// Writes the ranking CSV and returns its path for the platform share sheet.
#[flutter_rust_bridge::frb(sync)]
pub fn ranking_export(english_header: bool) -> ActionResponse {
    let header = if english_header {
        HeaderStyle::English
    } else {
        HeaderStyle::Legacy
    };
    let export_dir = runtime_config().export_dir.clone();
    let result = with_roster_service(|service| {
        write_ranking_file(&export_dir, &service.ranked_members(), header)
            .map_err(|e| e.to_string())
    });
    match result {
        Ok(path) => ActionResponse::success(
            "Ranking exported.",
            Some(path.to_string_lossy().into_owned()),
        ),
        Err(err) => {
            warn!("event=ffi_export module=ffi status=error");
            ActionResponse::failure(format!("ranking_export failed: {err}"))
        }
    }
}

fn runtime_config() -> &'static RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(RuntimeConfig::from_env)
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{raw}`"))
}

fn with_roster_service<T>(
    f: impl FnOnce(&mut RosterService<SqliteRosterRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = ROSTER_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(&runtime_config().db_path)
        .map_err(|err| format!("roster DB open failed: {err}"))?;
    let repo = SqliteRosterRepository::try_new(&conn)
        .map_err(|err| format!("roster repo init failed: {err}"))?;
    let first_run = !repo
        .has_stored_events()
        .map_err(|err| format!("roster load failed: {err}"))?;
    let mut service =
        RosterService::load(repo).map_err(|err| format!("roster load failed: {err}"))?;
    if first_run {
        service
            .persist_events()
            .map_err(|err| format!("roster save failed: {err}"))?;
    }
    f(&mut service)
}
