//! Output formatting utilities.

use chrono::{DateTime, Local, TimeZone};
use clubtally_core::{Event, Member, PointLog, RankedEntry};
use serde_json::{json, Value};

/// Formats epoch milliseconds in local time, or `?` when out of range.
pub fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => format_local(at),
        None => "?".to_string(),
    }
}

fn format_local(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Prints the member table header.
#[allow(clippy::print_literal)]
pub fn print_member_header() {
    println!("{:<8} {:<36} {:>8}  {}", "RANK", "ID", "POINTS", "NAME");
    println!("{}", "-".repeat(72));
}

pub fn format_ranked_row(entry: &RankedEntry<'_>) -> String {
    format!(
        "{:<8} {:<36} {:>8}  {}",
        entry.badge(),
        entry.member.id,
        entry.member.points,
        entry.member.name
    )
}

pub fn ranked_json(entry: &RankedEntry<'_>) -> Value {
    json!({
        "rank": entry.rank,
        "badge": entry.badge(),
        "id": entry.member.id.to_string(),
        "name": entry.member.name,
        "points": entry.member.points,
        "history_len": entry.member.history.len(),
    })
}

/// Prints the event table header.
#[allow(clippy::print_literal)]
pub fn print_event_header() {
    println!("{:<3} {:<36} {:>8}  {}", "", "ID", "POINTS", "NAME");
    println!("{}", "-".repeat(72));
}

pub fn format_event_row(event: &Event, selected: bool) -> String {
    let marker = if selected { "*" } else { " " };
    format!(
        "{marker}{:<2} {:<36} {:>8}  {}",
        event.glyph, event.id, event.points, event.name
    )
}

pub fn event_json(event: &Event, selected: bool) -> Value {
    json!({
        "id": event.id.to_string(),
        "name": event.name,
        "points": event.points,
        "glyph": event.glyph,
        "selected": selected,
    })
}

/// Prints a member's history, newest first, with its display index.
pub fn print_history(member: &Member) {
    println!("{} ({} points)", member.name, member.points);
    if member.history.is_empty() {
        println!("  no history yet");
        return;
    }
    for (index, log) in member.history.iter().enumerate() {
        println!("  {}", format_history_row(index, log));
    }
}

fn format_history_row(index: usize, log: &PointLog) -> String {
    format!(
        "[{index}] {:<16} {:>+6}  {}",
        format_timestamp(log.created_at_ms),
        log.points,
        log.event_name
    )
}
